pub mod ubci_provider;

pub use ubci_provider::UbciProvider;
