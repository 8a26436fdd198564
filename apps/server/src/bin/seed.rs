//! `seed`: fills a database with generated planograms for development.
//!
//! Usage:
//!   seed [--count <n>] [--db <path>]
//!
//! Without `--db` the server's configured database is used.

use std::io::Cursor;
use std::path::PathBuf;

use clap::Parser;
use image::{ImageFormat, Rgb, RgbImage};
use tracing::info;

use planogram_core::NewPlanogram;
use planogram_db::{Database, DbConfig};
use planogram_server::config::ServerConfig;

/// Planogram seeder.
#[derive(Parser, Debug)]
#[command(name = "seed", about = "Insert generated planograms")]
struct Cli {
    /// Number of planograms to insert.
    #[arg(short = 'n', long = "count", default_value_t = 10)]
    count: u32,

    /// SQLite file (defaults to the server's database).
    #[arg(long = "db")]
    db: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    planogram_server::init_tracing();

    let cli = Cli::parse();

    let config = match cli.db {
        Some(path) => DbConfig::new(path),
        None => ServerConfig::load()?.db_config()?,
    };
    info!(path = ?config.database_path, count = cli.count, "Seeding planograms");

    let db = Database::new(config).await?;
    let repo = db.planograms();

    for n in 1..=cli.count {
        let new = NewPlanogram {
            name: format!("Planogram {}", n),
            image: shelf_image(n)?,
            store: format!("Store {}", (n - 1) / 6 + 1),
            aisle: format!("Aisle {}", (n - 1) / 3 % 2 + 1),
            shelf: format!("Shelf {}", (n - 1) % 3 + 1),
        };
        let id = repo.create(&new).await?;
        info!(id = id, name = %new.name, "Inserted");
    }

    info!(total = repo.count().await?, "Done");
    db.close().await;
    Ok(())
}

/// Horizontal bands standing in for shelf rows, tinted per planogram.
fn shelf_image(n: u32) -> Result<Vec<u8>, image::ImageError> {
    let tint = (n.wrapping_mul(37) % 200) as u8;
    let img = RgbImage::from_fn(240, 160, |_, y| {
        if y % 40 < 4 {
            Rgb([60, 60, 60])
        } else {
            Rgb([tint, 180 - tint / 2, 220])
        }
    });

    let mut png = Vec::new();
    img.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
    Ok(png)
}
