//! # PYQ Portal Documentation
//!
//! Previous year question papers for university students, browsed by branch and semester.
//!
//! ## Layout
//!
//! - `backend/bank`: dataset, slugs, branch registry, lookups, PDF path guard
//! - `backend/server`: axum routes, counters, identity stub
//! - `backend`: `pyq-portal` binary
//! - `backend/data`, `backend/public/pdfs`: sample dataset
//!
//! ## Notes
//!
//! ### Dataset
//! - Six branches, eight semesters each, roughly 200 subjects in total
//! - Papers are keyed by subject slug, so a renamed subject needs its `pyqs.json` key renamed too
//! - Subjects without papers still show up in listings with a zero count
//!
//! ### Counters
//! - In memory only, a restart wipes them
//! - One process, so no cross-instance aggregation
//! - Raw `/pdfs/**` hits are never counted, only `/files/view` and `/files/download`
//!
//! ### Login
//! - Not authentication, any credentials work as long as a branch resolves
//! - Token only carries name, email and branch so the client can land on the right dashboard
//!
//!
//!
//! ## Deployment
//!
//! ```sh
//! cd backend
//! PORT=4000 CLIENT_ORIGIN=https://pyq.example.edu APP_ENV=production cargo run --release
//! ```
//!
//! - Put the signing key in `/run/secrets/JWT_SECRET` (falls back to the `JWT_SECRET` variable)
//! - `CLIENT_DIR` pointing at a built client makes the binary serve it as well
//! - Behind a reverse proxy, forward `/api`, `/files` and `/pdfs` at minimum

pub mod client;
