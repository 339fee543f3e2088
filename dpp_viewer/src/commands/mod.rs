pub mod hash;
pub mod materials;
pub mod view;
