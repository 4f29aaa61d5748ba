pub mod residue_constants;
