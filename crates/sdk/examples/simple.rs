//! Simple SDK Example
//!
//! Demonstrates basic usage of the Alunometa SDK.
//!
//! # Usage
//!
//! 1. Start the server:
//!    ```bash
//!    cargo run --package alunometa-daemon
//!    ```
//!
//! 2. Run this example:
//!    ```bash
//!    cargo run --package alunometa-sdk --example simple
//!    ```

use alunometa_sdk::{AlunometaClient, Area, ListQuery, NewAluno, NewMeta};
use chrono::NaiveDate;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Alunometa SDK - Simple Example");
    println!("==============================\n");

    // 1. Connect
    println!("1. Connecting to server...");
    let client = AlunometaClient::connect("http://127.0.0.1:8080")?;
    if !client.health().await? {
        return Err("server is not healthy".into());
    }
    println!("   ✓ Connected\n");

    // 2. Register a student
    println!("2. Creating an aluno...");
    let nascimento = NaiveDate::from_ymd_opt(2007, 5, 14).ok_or("invalid date")?;
    let aluno = client
        .create_aluno(&NewAluno::new("Clara Souza", "clara@example.com", nascimento))
        .await?;
    println!("   ✓ Aluno {} created\n", aluno.id);

    // 3. Give her a goal per area
    println!("3. Creating metas...");
    for (valor, area) in [(680, Area::Matematica), (720, Area::Linguagens)] {
        let meta = client
            .create_meta(&NewMeta::new(valor, area).with_aluno(aluno.id))
            .await?;
        println!("   ✓ Meta {}: {} in {}", meta.id, meta.valor, meta.area);
    }
    println!();

    // 4. Query them back
    println!("4. Listing metas above 700...");
    let listing = client
        .list_metas(
            &ListQuery::new()
                .filter("alunoId.equals", aluno.id.to_string())
                .filter("valor.greaterThan", "700")
                .sort("valor,desc"),
        )
        .await?;
    println!("   ✓ {} of {} total", listing.items.len(), listing.total_count);
    for meta in &listing.items {
        println!("     - {} {}", meta.area, meta.valor);
    }

    println!("\n✓ Example completed successfully!");

    Ok(())
}
