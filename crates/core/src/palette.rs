//! The fixed notebook color palette.
//!
//! Colors are display hints handed back to clients verbatim; the service
//! never interprets them. Assignment is deterministic from a notebook's
//! ordinal position so every client renders the same colors.

/// The palette, cycled by notebook creation order.
pub const NOTEBOOK_COLORS: [&str; 10] = [
    "border-blue-300",
    "border-green-300",
    "border-purple-300",
    "border-yellow-300",
    "border-pink-300",
    "border-indigo-300",
    "border-teal-300",
    "border-orange-300",
    "border-red-300",
    "border-cyan-300",
];

/// Color for the notebook at ordinal position `index`.
pub fn notebook_color(index: usize) -> &'static str {
    NOTEBOOK_COLORS[index % NOTEBOOK_COLORS.len()]
}
