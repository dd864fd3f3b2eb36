pub mod pz;
