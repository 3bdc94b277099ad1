use anyhow::Context;
use dotenv::dotenv;
use intel_brief::{GeminiClient, PipelineController};
use std::fs::File;
use std::io::Write;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    println!("🚀 Starting Intel Brief example...");

    // 1. One client serves both capabilities
    let gemini = GeminiClient::from_env()?;
    println!("🤖 Using model {}", gemini.config().model);
    let controller = PipelineController::new(gemini.clone(), gemini);

    // 2. Seed the profiles the way a user would
    controller.update_seller(|s| {
        s.name = "Sarah Jenkins".to_string();
        s.company = "Acme Analytics".to_string();
        s.website = "https://www.example.com".to_string();
    });
    controller.update_buyer(|b| {
        b.company = "Globex".to_string();
        b.website = "https://www.iana.org".to_string();
        b.pain_points = "Month-end close takes three weeks".to_string();
    });

    // 3. Enrich from the reference URLs
    if controller.can_fetch() {
        println!("🔎 Extracting profile data from {:?}...", controller.reference_urls());
        match controller.fetch().await {
            Ok(outcome) => println!(
                "✅ Profiles enriched (seller: {}, buyer: {}, confidence: {:?})",
                outcome.seller_updated, outcome.buyer_updated, outcome.confidence
            ),
            Err(e) => eprintln!("⚠️  Extraction skipped: {}", e),
        }
    }

    if !controller.can_analyze() {
        controller.update_buyer(|b| {
            if b.name.trim().is_empty() {
                b.name = "Michael Chen".to_string();
            }
        });
    }

    // 4. Synthesize and render
    println!("🧠 Synthesizing intelligence brief...");
    let report = controller.analyze().await?;
    println!("📥 Received {} chars of markdown.", report.markdown().len());

    let document = controller
        .render_report()
        .context("report disappeared after analysis")?;
    for callout in document.callouts() {
        println!("  • {}: {}", callout.label(), callout.plain_text());
    }

    let mut html = File::create("brief.html")?;
    html.write_all(document.to_html().as_bytes())?;
    println!("💾 Wrote brief.html");

    if let Some(export) = controller.export() {
        let file_name = export.file_name.replace(".pdf", ".txt");
        let mut file = File::create(&file_name)?;
        writeln!(file, "{}\n", export.title)?;
        file.write_all(export.body.as_bytes())?;
        println!("💾 Wrote {}", file_name);
    }

    Ok(())
}
