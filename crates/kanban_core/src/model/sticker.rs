//! Sticker annotations attached to projects.

use crate::record::{PositionRecord, StickerRecord};

/// Integer coordinates of a sticker on its project card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i64,
    pub y: i64,
}

impl Position {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Positioned visual annotation.
///
/// Stickers carry no id; two stickers are the same sticker when every
/// field matches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Sticker {
    label: Option<String>,
    background_color: Option<String>,
    color: Option<String>,
    icon: Option<String>,
    class: Option<String>,
    position: Position,
}

impl Sticker {
    /// Creates a sticker with a label at the origin.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    pub fn with_colors(
        mut self,
        background_color: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        self.background_color = Some(background_color.into());
        self.color = Some(color.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn at(mut self, x: i64, y: i64) -> Self {
        self.position = Position::new(x, y);
        self
    }

    pub fn from_record(record: StickerRecord) -> Self {
        Self {
            label: record.label,
            background_color: record.background_color,
            color: record.color,
            icon: record.icon,
            class: record.class,
            position: Position::new(record.position.x, record.position.y),
        }
    }

    pub fn to_record(&self) -> StickerRecord {
        StickerRecord {
            label: self.label.clone(),
            background_color: self.background_color.clone(),
            color: self.color.clone(),
            icon: self.icon.clone(),
            class: self.class.clone(),
            position: PositionRecord {
                x: self.position.x,
                y: self.position.y,
            },
        }
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn background_color(&self) -> Option<&str> {
        self.background_color.as_deref()
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    /// Style tag.
    pub fn class(&self) -> Option<&str> {
        self.class.as_deref()
    }

    pub fn position(&self) -> Position {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::{Position, Sticker};

    #[test]
    fn new_sticker_defaults_to_origin() {
        let sticker = Sticker::new("urgent");
        assert_eq!(sticker.label(), Some("urgent"));
        assert_eq!(sticker.position(), Position::default());
        assert_eq!(sticker.class(), None);
    }

    #[test]
    fn equality_covers_every_field() {
        let base = Sticker::new("urgent").with_colors("#f00", "#fff");
        assert_eq!(base, Sticker::new("urgent").with_colors("#f00", "#fff"));
        assert_ne!(base, base.clone().at(1, 0));
        assert_ne!(base, base.clone().with_icon("fire.png"));
    }
}
