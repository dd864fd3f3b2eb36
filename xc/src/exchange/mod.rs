pub mod pbe;
pub mod slater;
