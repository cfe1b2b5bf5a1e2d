//! # Order Desk
//!
//! > **Order entry for a distribution business: cart, stock check, submission.**
//!
//! An [`OrderBuilder`](builder::OrderBuilder) session lets a back-office user pick a client
//! and a seller, fill a cart from the catalog, check stock against the backend and register
//! the order, optionally forcing it through known shortages.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Services behind traits
//! The builder never talks to a concrete backend. It holds a [`Services`](services::Services)
//! bundle of trait objects, so the same session logic runs against:
//! - the **in-process actor backend** ([`lifecycle::DeskSystem`]), which keeps real stock
//!   accounting and a shortfall ledger;
//! - the **REST backend** ([`rest::RestBackend`]) for the existing JSON API;
//! - `mockall` mocks in tests.
//!
//! ### Observable state
//! Every session publishes a [`BuilderView`](builder::BuilderView) on a
//! `tokio::sync::watch` channel. Front ends subscribe and re-render; they never poke at the
//! builder's fields.
//!
//! ### Money is exact
//! Prices and totals are `rust_decimal::Decimal`, rounded to cents half away from zero.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Session ([`builder`], [`cart`], [`catalog`], [`directory`])
//! - **Role**: Order-entry state and the rules around it.
//! - **Key items**: [`OrderBuilder`](builder::OrderBuilder), [`Cart`](cart::Cart),
//!   [`TaxPolicy`](cart::TaxPolicy).
//!
//! ### 2. The Seams ([`services`], [`rest`])
//! - **Role**: What the session needs from a backend, and the HTTP implementation.
//!
//! ### 3. The Engine ([`framework`])
//! The generic `ResourceActor<T>` every in-process resource runs on.
//! - **Key items**: [`ActorEntity`](framework::ActorEntity),
//!   [`ResourceActor`](framework::ResourceActor).
//!
//! ### 4. The Actors ([`product_actor`], [`directory_actor`], [`order_actor`], [`clients`])
//! - **Role**: Stock reservation, directories and order registration, each behind a typed
//!   client.
//!
//! ### 5. The Orchestrator ([`lifecycle`], [`config`], [`report`])
//! - **Role**: Spins the actors up, wires them, shuts them down; configuration and the
//!   delivery consolidation sheet.
//!
//! ## 🚀 Running the Demo
//!
//! ```bash
//! # In-process backend with seeded data
//! RUST_LOG=info cargo run
//!
//! # Against a running API
//! cargo run -- --backend rest --base-url http://localhost:8080/api
//! ```

pub mod builder;
pub mod cart;
pub mod catalog;
pub mod clients;
pub mod config;
pub mod directory;
pub mod directory_actor;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod product_actor;
pub mod report;
pub mod rest;
pub mod services;
