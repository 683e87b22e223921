//! # letterbox
//!
//! Normalizes project screenshots onto a fixed 1280×720 canvas. Each image is
//! scaled to fit without cropping, centered on a white background
//! (letterboxed or pillarboxed as needed), tagged with 72 dpi, and re-saved
//! next to the originals as `processed_<name>`.
//!
//! # Pipeline
//!
//! ```text
//! images/sih.png ─┐
//!                 ├─ decode → flatten → fit (Lanczos3) → paste on canvas → encode
//! images/*.jpg  ──┘                                                         │
//!                                                  images/processed/processed_<name>
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | Letterbox math, backend trait, pure-Rust decode/resize/encode |
//! | [`batch`] | Batch driver: per-file existence check, typed outcomes, report |
//! | [`config`] | `letterbox.toml` loading, stock defaults, validation |
//! | [`naming`] | `processed_` output names and extension-based encoder choice |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Typed Outcomes, Console Compatible
//!
//! A broken or missing file never aborts a batch. Each file yields an
//! [`batch::ImageOutcome`], which the CLI prints as one line and which can be
//! written out as a JSON report. The process exit status does not depend on
//! per-file outcomes.
//!
//! ## Explicit Transparency Handling
//!
//! Images with an alpha channel are blended onto white, the canvas color,
//! before resizing. Palette images are expanded by the decoder first.
//!
//! ## Encoder From the File Name
//!
//! Sources named `*.jpg` are written as JPEG (quality 85); everything else,
//! including `*.jpeg`, is written as PNG at maximum compression. DPI is
//! embedded as a JFIF density or a PNG `pHYs` chunk.

pub mod batch;
pub mod config;
pub mod imaging;
pub mod naming;
pub mod output;
