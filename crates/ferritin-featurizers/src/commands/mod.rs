pub mod align;
pub mod featurize;
