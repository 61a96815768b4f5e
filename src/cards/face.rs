//! Card faces - what a card shows and what it matches on.
//!
//! A `Face` carries the visual triple a host renders (sprite, text, color)
//! plus the `FaceKey` two cards are compared by. Only the key takes part in
//! matching, so two faces can look different and still form a pair (see
//! `Deck::build_with_replacements`).

use serde::{Deserialize, Serialize};

/// Comparable value deciding whether two cards match.
///
/// Usually a sprite name, but any label works.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FaceKey(pub String);

impl FaceKey {
    /// Create a face key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Get the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FaceKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for FaceKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl std::fmt::Display for FaceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// RGBA tint applied to a card face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FaceColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl FaceColor {
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);

    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }
}

impl Default for FaceColor {
    fn default() -> Self {
        Self::WHITE
    }
}

/// What a card shows when face up.
///
/// ## Example
///
/// ```
/// use card_match::cards::{Face, FaceColor};
///
/// let cat = Face::new("cat")
///     .with_sprite("animals/cat.png")
///     .with_text("Cat")
///     .with_color(FaceColor::rgb(240, 200, 120));
///
/// assert_eq!(cat.key.as_str(), "cat");
/// assert!(cat.matches(&Face::new("cat")));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Face {
    /// Matching key.
    pub key: FaceKey,

    /// Sprite asset name, if the face shows an image.
    pub sprite: Option<String>,

    /// Label, if the face shows text.
    pub text: Option<String>,

    /// Tint.
    #[serde(default)]
    pub color: FaceColor,
}

impl Face {
    /// Create a face with only a key; visuals default to none and white.
    pub fn new(key: impl Into<FaceKey>) -> Self {
        Self {
            key: key.into(),
            sprite: None,
            text: None,
            color: FaceColor::default(),
        }
    }

    /// Set the sprite (builder pattern).
    #[must_use]
    pub fn with_sprite(mut self, sprite: impl Into<String>) -> Self {
        self.sprite = Some(sprite.into());
        self
    }

    /// Set the label (builder pattern).
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the tint (builder pattern).
    #[must_use]
    pub fn with_color(mut self, color: FaceColor) -> Self {
        self.color = color;
        self
    }

    /// Check whether two faces form a pair.
    #[must_use]
    pub fn matches(&self, other: &Face) -> bool {
        self.key == other.key
    }
}

impl From<&str> for Face {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_builder() {
        let face = Face::new("sun")
            .with_sprite("sky/sun.png")
            .with_text("Sun")
            .with_color(FaceColor::rgb(255, 220, 0));

        assert_eq!(face.key, FaceKey::new("sun"));
        assert_eq!(face.sprite.as_deref(), Some("sky/sun.png"));
        assert_eq!(face.text.as_deref(), Some("Sun"));
        assert_eq!(face.color, FaceColor::rgba(255, 220, 0, 255));
    }

    #[test]
    fn test_matching_ignores_visuals() {
        let picture = Face::new("dog").with_sprite("dog.png");
        let word = Face::new("dog").with_text("Dog");
        let other = Face::new("cat").with_sprite("dog.png");

        assert!(picture.matches(&word));
        assert!(!picture.matches(&other));
    }

    #[test]
    fn test_default_color() {
        assert_eq!(Face::new("x").color, FaceColor::WHITE);
    }

    #[test]
    fn test_serde_default_color() {
        let json = r#"{"key":"moon","sprite":null,"text":"Moon"}"#;
        let face: Face = serde_json::from_str(json).unwrap();
        assert_eq!(face.key.as_str(), "moon");
        assert_eq!(face.color, FaceColor::WHITE);
    }
}
