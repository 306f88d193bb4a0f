//! Built-in arithmetic building blocks used by the allocation engine.

// Percentages of a base amount
pub mod percentage_of;

// Allocation helpers
pub mod even_split;
pub mod proportional_allocator;
