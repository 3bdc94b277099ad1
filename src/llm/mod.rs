pub mod prompts;
pub mod schema;

#[cfg(feature = "gemini")]
pub mod client;
#[cfg(feature = "gemini")]
pub mod types;

#[cfg(feature = "gemini")]
pub use client::*;
pub use prompts::*;
pub use schema::to_gemini_schema;
