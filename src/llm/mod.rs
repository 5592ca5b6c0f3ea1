// Completion endpoint client

pub mod mistral;

pub use mistral::MistralClient;
