//! The right to capture en passant.

use super::square::Square;

/// The square a pawn may capture en passant onto, if any.
///
/// The right exists for exactly one ply: it is set right after a double pawn
/// push and cleared by whatever move comes next. The default value is "no
/// right", which never aliases a real square.
/// ```
/// # use horsey_position::game::{en_passant::EnPassant, square::Square};
/// let mut ep = EnPassant::default();
/// assert!(!ep.exists());
/// ep.set(Square::E3);
/// assert!(ep.exists_at(Square::E3));
/// ep.clear();
/// assert_eq!(ep.square(), None);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnPassant(Option<Square>);
impl EnPassant {
    /// No en passant right.
    pub const fn none() -> Self {
        Self(None)
    }

    /// The right to capture onto `square`.
    pub const fn on(square: Square) -> Self {
        Self(Some(square))
    }

    /// The target square of the right, if it exists.
    #[inline]
    pub const fn square(&self) -> Option<Square> {
        self.0
    }

    /// Checks if the right exists at all.
    #[inline]
    pub const fn exists(&self) -> bool {
        self.0.is_some()
    }

    /// Checks if the right exists and targets `square`.
    #[inline]
    pub fn exists_at(&self, square: Square) -> bool {
        self.0 == Some(square)
    }

    #[inline]
    pub fn set(&mut self, square: Square) {
        self.0 = Some(square)
    }

    #[inline]
    pub fn clear(&mut self) {
        self.0 = None
    }
}
impl From<Option<Square>> for EnPassant {
    fn from(value: Option<Square>) -> Self {
        Self(value)
    }
}
impl std::fmt::Display for EnPassant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(square) => write!(f, "{square}"),
            None => write!(f, "-"),
        }
    }
}
