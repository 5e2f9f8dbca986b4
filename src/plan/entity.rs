use super::item::PlacedItem;
use super::wall::Wall;

/// A placed entity in entity-list order.
#[derive(Debug, Clone, Copy)]
pub enum PlacedEntity<'a> {
    Wall(&'a Wall),
    Item(&'a PlacedItem),
}

impl<'a> PlacedEntity<'a> {
    #[must_use]
    pub fn id(&self) -> &'a str {
        match self {
            Self::Wall(w) => &w.id,
            Self::Item(i) => &i.id,
        }
    }

    #[must_use]
    pub fn as_wall(&self) -> Option<&'a Wall> {
        match self {
            Self::Wall(w) => Some(w),
            Self::Item(_) => None,
        }
    }

    #[must_use]
    pub fn as_item(&self) -> Option<&'a PlacedItem> {
        match self {
            Self::Item(i) => Some(i),
            Self::Wall(_) => None,
        }
    }
}

impl<'a> From<&'a Wall> for PlacedEntity<'a> {
    fn from(wall: &'a Wall) -> Self {
        Self::Wall(wall)
    }
}

impl<'a> From<&'a PlacedItem> for PlacedEntity<'a> {
    fn from(item: &'a PlacedItem) -> Self {
        Self::Item(item)
    }
}
