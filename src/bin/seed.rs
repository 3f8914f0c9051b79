// src/bin/seed.rs
use anyhow::{anyhow, bail, Context, Result};
use chrono::{Duration as ChronoDuration, Utc};
use dotenv::dotenv;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use std::env;
use std::process;
use std::time::{Duration, Instant};

// --- ANSI colours ---
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

// --- Sample data ---

struct SampleArtist {
    name: &'static str,
    bio: &'static str,
    specialization: &'static [&'static str],
}

struct SampleArtwork {
    title: &'static str,
    artist: usize,
    category: &'static str,
    medium: &'static str,
    price: f64,
    year: i32,
}

const ARTISTS: &[SampleArtist] = &[
    SampleArtist {
        name: "Lucia Moreno",
        bio: "Painter working with light and large colour fields.",
        specialization: &["Painting", "Abstract"],
    },
    SampleArtist {
        name: "Kenji Watanabe",
        bio: "Sculptor of reclaimed wood and steel.",
        specialization: &["Sculpture"],
    },
    SampleArtist {
        name: "Amara Okafor",
        bio: "Photographer documenting city nights.",
        specialization: &["Photography"],
    },
];

const ARTWORKS: &[SampleArtwork] = &[
    SampleArtwork { title: "Solstice", artist: 0, category: "Painting", medium: "Oil on canvas", price: 2400.0, year: 2021 },
    SampleArtwork { title: "Blue Hours", artist: 0, category: "Painting", medium: "Acrylic", price: 1800.0, year: 2022 },
    SampleArtwork { title: "Driftwood II", artist: 1, category: "Sculpture", medium: "Oak and steel", price: 5200.0, year: 2020 },
    SampleArtwork { title: "Tensile", artist: 1, category: "Sculpture", medium: "Steel", price: 3900.0, year: 2023 },
    SampleArtwork { title: "Neon Market", artist: 2, category: "Photography", medium: "Archival print", price: 650.0, year: 2023 },
    SampleArtwork { title: "Last Train", artist: 2, category: "Photography", medium: "Archival print", price: 720.0, year: 2024 },
];

#[derive(Deserialize)]
struct Created {
    id: String,
}

#[derive(Debug)]
struct StepResult {
    step: String,
    created: usize,
    failed: usize,
    duration_secs: f64,
}

// --- Seeder ---

struct GallerySeeder {
    base_url: String,
    client: Client,
    results: Vec<StepResult>,
}

impl GallerySeeder {
    fn new(base_url: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .cookie_store(true)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            base_url,
            client,
            results: Vec::new(),
        })
    }

    async fn check_service_health(&self) -> bool {
        match self.client.get(format!("{}/health", self.base_url)).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await
            .with_context(|| format!("POST {} failed", path))?;

        let status = response.status();
        let body: Value = response.json().await.unwrap_or(Value::Null);
        if !status.is_success() {
            bail!("HTTP {} - {}", status, body);
        }
        Ok(body)
    }

    /// Register the curator account, falling back to login if it already exists
    async fn authenticate(&self, email: &str, password: &str) -> Result<()> {
        let register = self
            .client
            .post(format!("{}/api/auth/register", self.base_url))
            .json(&json!({ "name": "Gallery Curator", "email": email, "password": password }))
            .send()
            .await
            .context("Register request failed")?;

        match register.status() {
            s if s.is_success() => {
                println!("{}✅ Registered {}{}", GREEN, email, RESET);
                Ok(())
            }
            StatusCode::BAD_REQUEST => {
                self.post("/api/auth/login", &json!({ "email": email, "password": password }))
                    .await
                    .context("Login failed")?;
                println!("{}✅ Logged in as {}{}", GREEN, email, RESET);
                Ok(())
            }
            other => Err(anyhow!("Register returned HTTP {}", other)),
        }
    }

    async fn create_all(&mut self, step: &str, path: &str, bodies: Vec<Value>) -> Vec<String> {
        let start = Instant::now();
        let mut ids = Vec::new();
        let mut failed = 0;

        println!("{}▶ {}...{}", CYAN, step, RESET);
        for body in &bodies {
            match self.post(path, body).await.and_then(|v| {
                serde_json::from_value::<Created>(v).map_err(|e| anyhow!("Unexpected response: {}", e))
            }) {
                Ok(created) => ids.push(created.id),
                Err(e) => {
                    failed += 1;
                    println!("{}  ❌ {}{}", RED, e, RESET);
                }
            }
        }

        self.results.push(StepResult {
            step: step.to_string(),
            created: ids.len(),
            failed,
            duration_secs: start.elapsed().as_secs_f64(),
        });
        ids
    }

    async fn run(&mut self, email: &str, password: &str) -> Result<()> {
        println!("\n{}🔍 Checking service status...{}", CYAN, RESET);
        if !self.check_service_health().await {
            println!("{}❌ Service unavailable.{}", RED, RESET);
            println!("{}Please ensure artlab-gallery is running (cargo run){}", YELLOW, RESET);
            process::exit(1);
        }
        println!("{}✅ Service available{}\n", GREEN, RESET);

        self.print_header();
        self.authenticate(email, password).await?;

        let artist_bodies = ARTISTS
            .iter()
            .map(|a| {
                json!({
                    "name": a.name,
                    "bio": a.bio,
                    "specialization": a.specialization,
                    "achievements": [],
                })
            })
            .collect();
        let artist_ids = self.create_all("Artists", "/api/artists", artist_bodies).await;
        if artist_ids.len() != ARTISTS.len() {
            bail!("Could not create every sample artist");
        }

        let artwork_bodies = ARTWORKS
            .iter()
            .map(|w| {
                json!({
                    "title": w.title,
                    "artistId": artist_ids[w.artist],
                    "description": format!("{} ({})", w.title, w.medium),
                    "price": w.price,
                    "category": w.category,
                    "medium": w.medium,
                    "year": w.year,
                })
            })
            .collect();
        let artwork_ids = self.create_all("Artworks", "/api/artworks", artwork_bodies).await;

        // Two artworks go on show, two are sold, the rest stay available
        let now = Utc::now();
        let exhibition = json!({
            "title": "New Acquisitions",
            "description": "Recent work from the gallery's artists.",
            "startDate": now - ChronoDuration::days(3),
            "endDate": now + ChronoDuration::days(30),
            "artworks": artwork_ids.iter().skip(4).collect::<Vec<_>>(),
            "imageUrl": "/images/exhibitions/new-acquisitions.jpg",
            "curator": "Gallery Curator",
            "status": "ongoing",
            "ticketPrice": 8.0,
        });
        self.create_all("Exhibitions", "/api/exhibitions", vec![exhibition]).await;

        let sale_bodies = artwork_ids
            .iter()
            .zip(ARTWORKS)
            .take(2)
            .enumerate()
            .map(|(i, (id, w))| {
                json!({
                    "artworkId": id,
                    "buyerName": format!("Collector {}", i + 1),
                    "buyerEmail": format!("collector{}@example.com", i + 1),
                    "paymentMethod": "card",
                    "price": w.price,
                    "saleDate": now - ChronoDuration::days(i as i64 * 5),
                })
            })
            .collect();
        self.create_all("Sales", "/api/sales", sale_bodies).await;

        self.print_summary();
        Ok(())
    }

    fn print_header(&self) {
        println!("{}╔══════════════════════════════════════════════════════════════╗{}", CYAN, RESET);
        println!("{}║   🎨  Gallery Seeder - sample artists, artworks and sales    ║{}", CYAN, RESET);
        println!("{}╚══════════════════════════════════════════════════════════════╝{}", CYAN, RESET);
        println!("\n{}📍 Target: {}{}", BOLD, self.base_url, RESET);
    }

    fn print_summary(&self) {
        println!("\n\n{}📋 Seed Summary{}", BOLD, RESET);
        println!("────────────────────────────────────────────────────────────");
        println!("{:<20} {:<10} {:>10} {:>10} {:>10}", "Step", "Status", "Created", "Failed", "Duration");
        println!("────────────────────────────────────────────────────────────");

        for res in &self.results {
            let status_icon = if res.failed == 0 { "✅" } else { "⚠️" };
            println!(
                "{:<20} {:<10} {:>10} {:>10} {:>9.1}s",
                res.step, status_icon, res.created, res.failed, res.duration_secs
            );
        }

        println!("────────────────────────────────────────────────────────────");
        let failed: usize = self.results.iter().map(|r| r.failed).sum();
        if failed == 0 {
            println!("\n{}✨ Seed completed successfully{}", GREEN, RESET);
        } else {
            println!("\n{}⚠️  Seed completed with {} failure(s){}", YELLOW, failed, RESET);
        }
    }
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let base_url = env::var("GALLERY_API_URL").unwrap_or_else(|_| "http://localhost:5000".to_string());
    let email = env::var("SEED_EMAIL").unwrap_or_else(|_| "curator@artlab.local".to_string());
    let password = env::var("SEED_PASSWORD").unwrap_or_else(|_| "curator-pass".to_string());

    let result = match GallerySeeder::new(base_url) {
        Ok(mut seeder) => seeder.run(&email, &password).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        println!("{}❌ {:#}{}", RED, e, RESET);
        process::exit(1);
    }
}
