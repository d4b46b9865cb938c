//! In-place pixel filters and the registry that names them.
//!
//! A [`Filter`] mutates a [`PixelBuffer`] without changing its dimensions.
//! Filters are stateless: applying the same filter to equal buffers always
//! yields equal results.
//!
//! # Filter Families
//!
//! - [`color`]: per-pixel channel maps (darker, lighter, threshold, invert,
//!   solarize, grayscale, sepia)
//! - [`neighborhood`]: filters reading a window around each pixel (smooth,
//!   edge detection, pixelize)
//! - [`geometric`]: coordinate remaps (mirror, fish eye)
//!
//! Neighborhood and geometric filters read from an unmodified copy of the
//! input so results never depend on iteration order.

pub mod color;
pub mod geometric;
pub mod neighborhood;

use std::fmt;

use crate::buffer::PixelBuffer;
use crate::error::EditError;

pub use color::{Darker, Grayscale, Invert, Lighter, Sepia, Solarize, Threshold};
pub use geometric::{FishEye, Mirror};
pub use neighborhood::{EdgeDetection, Pixelize, Smooth};

/// A named, stateless in-place image transformation.
pub trait Filter: Send + Sync {
    /// Display name, unique within a [`FilterRegistry`].
    fn name(&self) -> &str;

    /// Transform `buffer` in place.
    fn apply(&self, buffer: &mut PixelBuffer);
}

/// Ordered collection of filters, looked up by name.
///
/// The order is the order filters are offered to the user.
#[derive(Default)]
pub struct FilterRegistry {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard filter menu.
    pub fn with_defaults() -> Self {
        Self {
            filters: vec![
                Box::new(Darker),
                Box::new(Lighter),
                Box::new(Threshold),
                Box::new(Invert),
                Box::new(Solarize),
                Box::new(Smooth),
                Box::new(Pixelize::default()),
                Box::new(Mirror),
                Box::new(Grayscale),
                Box::new(EdgeDetection),
                Box::new(FishEye::default()),
                Box::new(Sepia),
            ],
        }
    }

    /// Add a filter at the end of the menu.
    ///
    /// Names are compared case-insensitively.
    pub fn register(&mut self, filter: Box<dyn Filter>) -> Result<(), EditError> {
        if self.get(filter.name()).is_some() {
            return Err(EditError::DuplicateFilter(filter.name().to_string()));
        }
        self.filters.push(filter);
        Ok(())
    }

    /// Find a filter by case-insensitive name.
    pub fn get(&self, name: &str) -> Option<&dyn Filter> {
        let name = name.trim();
        self.filters
            .iter()
            .find(|f| f.name().eq_ignore_ascii_case(name))
            .map(|f| f.as_ref())
    }

    /// Filter names in menu order.
    pub fn names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl fmt::Debug for FilterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Rgb;

    struct Fill(Rgb);

    impl Filter for Fill {
        fn name(&self) -> &str {
            "Fill"
        }

        fn apply(&self, buffer: &mut PixelBuffer) {
            let color = self.0;
            buffer.map_pixels(|_| color);
        }
    }

    #[test]
    fn test_default_menu_order() {
        let registry = FilterRegistry::with_defaults();
        assert_eq!(
            registry.names(),
            vec![
                "Darker",
                "Lighter",
                "Threshold",
                "Invert",
                "Solarize",
                "Smooth",
                "Pixelize",
                "Mirror",
                "Grayscale",
                "Edge Detection",
                "Fish Eye",
                "Sepia",
            ]
        );
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let registry = FilterRegistry::with_defaults();
        assert_eq!(registry.get("edge detection").unwrap().name(), "Edge Detection");
        assert_eq!(registry.get("  SEPIA ").unwrap().name(), "Sepia");
        assert!(registry.get("Blur").is_none());
    }

    #[test]
    fn test_register_custom_filter() {
        let mut registry = FilterRegistry::new();
        assert!(registry.is_empty());

        registry.register(Box::new(Fill(Rgb::WHITE))).unwrap();
        assert_eq!(registry.len(), 1);

        let mut buf = PixelBuffer::new(2, 2).unwrap();
        registry.get("fill").unwrap().apply(&mut buf);
        assert!(buf.pixels().all(|px| px == Rgb::WHITE));
    }

    #[test]
    fn test_register_duplicate_name() {
        let mut registry = FilterRegistry::with_defaults();
        let result = registry.register(Box::new(Invert));
        assert_eq!(
            result.unwrap_err(),
            EditError::DuplicateFilter("Invert".to_string())
        );
        assert_eq!(registry.len(), 12);
    }

    #[test]
    fn test_debug_lists_names() {
        let mut registry = FilterRegistry::new();
        registry.register(Box::new(Mirror)).unwrap();
        assert_eq!(format!("{:?}", registry), r#"["Mirror"]"#);
    }
}
