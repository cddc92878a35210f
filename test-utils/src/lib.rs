//! Neverhome Bot Test Utils
//!
//! Provides shared testing utilities for the moderation bot. Serenity models are large and
//! mostly constructed by deserializing gateway payloads, so this crate offers factories that
//! build them the same way from minimal JSON with sensible defaults.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::serenity::{create_test_member, create_test_role};
//!
//! #[test]
//! fn caller_with_mod_role() {
//!     let role = create_test_role(111111111, "Mod", 0);
//!     let member = create_test_member(555, "someone", Some("Nick"), None, &[111111111]);
//!     // Use in your tests...
//! }
//! ```

pub mod serenity;
