pub mod eddsa;
