// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Voice note processing pipeline for the Voxbrief bot.
//!
//! [`JobProcessor`] drives one job through its fixed stage order: validate,
//! idempotency check, rate check, download, transcribe, summarize, deliver,
//! finalize. Every invocation resolves to a [`ProcessingResult`]; no error
//! escapes to the caller.
//!
//! [`ProcessingResult`]: voxbrief_core::ProcessingResult

mod processor;

pub use processor::{JobProcessor, ProcessorSettings};
