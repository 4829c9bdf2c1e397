use pddikti_scraper::config::ScraperConfig;
use pddikti_scraper::logger;
use pddikti_scraper::pipeline::{self, DataOrigin, RunReport};

#[tokio::main]
async fn main() {
    logger::init();

    println!("{}", "=".repeat(60));
    println!("PDDikti Universitas Ekasakti Data Scraper");
    println!("{}", "=".repeat(60));
    println!();

    let root = std::env::var("ROOT").unwrap_or_else(|_| ".".to_string());
    let config = ScraperConfig::load(&root);

    match pipeline::run(&config).await {
        Ok(report) => print_summary(&report),
        Err(e) => {
            println!();
            println!("{}", "=".repeat(60));
            println!("SCRAPING FAILED");
            println!("{}", "=".repeat(60));
            println!();
            eprintln!("Error details: {}", e);
            println!();
            println!("Troubleshooting tips:");
            println!("   1. Check your internet connection");
            println!("   2. Ensure the PDDikti website is accessible");
            println!("   3. Check that chromedriver is running at the configured URL");
            println!("   4. Make sure the output path is writable");
            std::process::exit(1);
        }
    }
}

fn print_summary(report: &RunReport) {
    println!();
    println!("{}", "=".repeat(60));
    println!("SCRAPING COMPLETED");
    println!("{}", "=".repeat(60));
    println!();
    println!("Summary:");
    println!("   University: {}", report.institution.name);
    println!("   Status: {}", report.institution.status);
    println!("   Akreditasi: {}", report.institution.akreditasi);
    println!("   Total Program Studi: {}", report.institution.programs.len());
    println!(
        "   Data source: {}",
        match report.origin {
            DataOrigin::Scraped => "live scrape",
            DataOrigin::Fallback => "fallback dataset",
        }
    );
    println!("   Output file: {}", report.csv_path.display());
    println!();
    println!("Daftar Program Studi:");
    println!("{}", "-".repeat(40));
    for (index, program) in report.institution.programs.iter().enumerate() {
        let jenjang = if program.jenjang.is_empty() {
            String::new()
        } else {
            format!(" ({})", program.jenjang)
        };
        let akreditasi = if program.akreditasi.is_empty() {
            String::new()
        } else {
            format!(" - Akreditasi: {}", program.akreditasi)
        };
        println!("   {:>2}. {}{}{}", index + 1, program.nama_prodi, jenjang, akreditasi);
    }
    println!();
}
