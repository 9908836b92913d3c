//! Fixed three-slot container for per-layer values.

/// One value per hatch layer.
///
/// The pipeline always draws exactly three layers, so thresholds, texture
/// choices and rendered layers are all carried in this struct rather than
/// in a variable-length collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HatchLayers<T> {
    /// Darkest zone; always the right-leaning diagonal texture.
    pub primary: T,
    /// Second zone; always the left-leaning diagonal texture.
    pub secondary: T,
    /// Lightest hatched zone; texture chosen by [`Style`](crate::Style).
    pub style_dependent: T,
}

impl<T> HatchLayers<T> {
    pub fn new(primary: T, secondary: T, style_dependent: T) -> Self {
        Self {
            primary,
            secondary,
            style_dependent,
        }
    }

    /// Apply `f` to each slot, in primary, secondary, style-dependent order.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> HatchLayers<U> {
        HatchLayers {
            primary: f(self.primary),
            secondary: f(self.secondary),
            style_dependent: f(self.style_dependent),
        }
    }

    pub fn as_ref(&self) -> HatchLayers<&T> {
        HatchLayers {
            primary: &self.primary,
            secondary: &self.secondary,
            style_dependent: &self.style_dependent,
        }
    }

    /// Pair each slot with the matching slot of `other`.
    pub fn zip<U>(self, other: HatchLayers<U>) -> HatchLayers<(T, U)> {
        HatchLayers {
            primary: (self.primary, other.primary),
            secondary: (self.secondary, other.secondary),
            style_dependent: (self.style_dependent, other.style_dependent),
        }
    }

    pub fn as_array(&self) -> [&T; 3] {
        [&self.primary, &self.secondary, &self.style_dependent]
    }

    pub fn into_array(self) -> [T; 3] {
        [self.primary, self.secondary, self.style_dependent]
    }
}

impl<T, E> HatchLayers<Result<T, E>> {
    /// Collapse three results, returning the first error in slot order.
    pub fn transpose(self) -> Result<HatchLayers<T>, E> {
        Ok(HatchLayers {
            primary: self.primary?,
            secondary: self.secondary?,
            style_dependent: self.style_dependent?,
        })
    }
}
