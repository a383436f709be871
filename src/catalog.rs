//! Bundled example label images, keyed by display name.

use std::path::Path;

/// Read-only mapping of example names to bundled image paths.
const EXAMPLES: &[(&str, &str)] = &[
    ("Chocolate Bar", "assets/chocolate_bar.jpg"),
    ("Potato Chips", "assets/potato_chips.jpg"),
    ("Shampoo", "assets/shampoo.jpg"),
    ("Body Lotion", "assets/body_lotion.jpg"),
];

/// Names of all bundled examples, in display order.
pub fn example_names() -> impl Iterator<Item = &'static str> {
    EXAMPLES.iter().map(|(name, _)| *name)
}

/// Look up the bundled image path for an example name.
pub fn example_path(name: &str) -> Option<&'static Path> {
    EXAMPLES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, path)| Path::new(*path))
}
