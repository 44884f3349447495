//! # Seed Data Generator
//!
//! Populates the database with sample recipes for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default database (./savora.db)
//! cargo run -p savora-db --bin seed
//!
//! # Specify database path
//! cargo run -p savora-db --bin seed -- --db ./data/savora.db
//! ```
//!
//! Every recipe goes through `RecipeRepository::create`, so seeding
//! exercises the same transactional write path the API uses.

use std::env;

use savora_core::{IngredientInput, NewRecipe};
use savora_db::{Database, DbConfig};

struct SampleRecipe {
    name: &'static str,
    description: &'static str,
    servings: i64,
    preparation_time: i64,
    cooking_time: i64,
    difficulty: &'static str,
    country: &'static str,
    ingredients: &'static [(&'static str, &'static str, &'static str)],
    steps: &'static [&'static str],
}

/// Sample recipes spanning a few cuisines and difficulty levels.
const SAMPLES: &[SampleRecipe] = &[
    SampleRecipe {
        name: "Pho Bo",
        description: "Vietnamese beef noodle soup with a slow-simmered broth.",
        servings: 4,
        preparation_time: 30,
        cooking_time: 180,
        difficulty: "medium",
        country: "Vietnam",
        ingredients: &[
            ("beef bones", "1.5", "kg"),
            ("rice noodles", "400", "g"),
            ("onion", "1", "piece"),
            ("ginger", "50", "g"),
            ("star anise", "3", "piece"),
            ("fish sauce", "3", "tbsp"),
        ],
        steps: &[
            "Char the onion and ginger over an open flame.",
            "Simmer the bones with the aromatics for three hours, skimming.",
            "Season the broth with fish sauce.",
            "Cook the noodles and divide between bowls.",
            "Top with sliced beef and ladle over the boiling broth.",
        ],
    },
    SampleRecipe {
        name: "Spaghetti Carbonara",
        description: "Roman pasta with eggs, guanciale and pecorino.",
        servings: 2,
        preparation_time: 10,
        cooking_time: 15,
        difficulty: "easy",
        country: "Italy",
        ingredients: &[
            ("spaghetti", "200", "g"),
            ("guanciale", "100", "g"),
            ("egg yolks", "3", "piece"),
            ("pecorino romano", "50", "g"),
            ("black pepper", "1", "tsp"),
        ],
        steps: &[
            "Render the guanciale until crisp.",
            "Boil the spaghetti in salted water until al dente.",
            "Whisk the yolks with the grated pecorino and pepper.",
            "Toss pasta, fat and egg mixture off the heat until creamy.",
        ],
    },
    SampleRecipe {
        name: "Banh Mi",
        description: "Crusty baguette sandwich with pickled vegetables and pate.",
        servings: 2,
        preparation_time: 25,
        cooking_time: 10,
        difficulty: "easy",
        country: "Vietnam",
        ingredients: &[
            ("baguette", "2", "piece"),
            ("pork belly", "200", "g"),
            ("carrot", "1", "piece"),
            ("daikon", "100", "g"),
            ("cilantro", "1", "bunch"),
            ("pate", "50", "g"),
        ],
        steps: &[
            "Pickle the julienned carrot and daikon in sweetened vinegar.",
            "Roast the pork belly until the skin crackles.",
            "Split and toast the baguettes.",
            "Spread with pate, layer the pork, pickles and cilantro.",
        ],
    },
    SampleRecipe {
        name: "Beef Bourguignon",
        description: "Burgundy beef stew braised in red wine.",
        servings: 6,
        preparation_time: 40,
        cooking_time: 210,
        difficulty: "hard",
        country: "France",
        ingredients: &[
            ("beef chuck", "1.2", "kg"),
            ("red wine", "750", "ml"),
            ("bacon lardons", "150", "g"),
            ("pearl onions", "250", "g"),
            ("mushrooms", "250", "g"),
            ("carrots", "2", "piece"),
        ],
        steps: &[
            "Brown the beef in batches in the bacon fat.",
            "Deglaze with wine and scrape up the fond.",
            "Braise covered in a low oven for three hours.",
            "Glaze the onions and saute the mushrooms separately.",
            "Fold the garnish into the stew and reduce the sauce.",
        ],
    },
];

#[tokio::main]
async fn main() {
    let args: Vec<String> = env::args().collect();
    let db_path = parse_arg(&args, "--db").unwrap_or_else(|| "./savora.db".to_string());

    println!("Seeding {} recipes into {db_path}", SAMPLES.len());

    let db = Database::new(DbConfig::new(&db_path))
        .await
        .expect("failed to open database");

    let repo = db.recipes();

    for sample in SAMPLES {
        let input = NewRecipe {
            name: sample.name.to_string(),
            description: sample.description.to_string(),
            servings: Some(sample.servings),
            preparation_time: Some(sample.preparation_time),
            cooking_time: Some(sample.cooking_time),
            difficulty: Some(sample.difficulty.to_string()),
            country: Some(sample.country.to_string()),
            image: None,
            ingredients: sample
                .ingredients
                .iter()
                .map(|(name, quantity, unit)| IngredientInput {
                    name: name.to_string(),
                    quantity: quantity.to_string(),
                    unit: unit.to_string(),
                })
                .collect(),
            steps: sample.steps.iter().map(|s| s.to_string()).collect(),
        };

        match repo.create(&input).await {
            Ok(id) => println!("  [{id}] {}", sample.name),
            Err(e) => eprintln!("  failed to seed {}: {e}", sample.name),
        }
    }

    db.close().await;
    println!("Done.");
}

/// Returns the value following `flag` in the argument list, if present.
fn parse_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}
