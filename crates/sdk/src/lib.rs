//! Alunometa SDK - Rust Client Library
//!
//! Typed async client for the Alunometa REST API.
//!
//! # Example
//!
//! ```no_run
//! use alunometa_sdk::{AlunometaClient, Area, NewMeta};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = AlunometaClient::connect("http://127.0.0.1:8080")?;
//!
//!     let meta = client
//!         .create_meta(&NewMeta::new(650, Area::Matematica).with_descricao("simulado"))
//!         .await?;
//!
//!     println!("Meta created: {}", meta.id);
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;

pub use client::AlunometaClient;
pub use error::{Result, SdkError};
pub use types::{
    Aluno, AlunoId, AlunoPatch, AlunoRef, Area, ListQuery, Listing, Meta, MetaId, MetaPatch,
    NewAluno, NewMeta,
};
