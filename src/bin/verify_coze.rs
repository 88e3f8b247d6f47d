use coze_gateway::{
    config::Config,
    verify::{check_client, diagnose, probe_gateway},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    let rule = "=".repeat(60);

    println!("\n{}\n🔧 Coze configuration check\n{}\n", rule, rule);
    println!("  API key:      {}", if config.api_token.is_some() { "set" } else { "unset" });
    println!("  Workflow ID:  {}", config.workflow_id.as_deref().unwrap_or("unset"));
    println!("  Base URL:     {}", config.base_url);
    println!("  Gateway URL:  {}", config.gateway_url);
    println!("  Enabled:      {}\n", config.enabled);

    let report = diagnose(&config);
    for finding in &report.findings {
        println!("  {}", finding);
    }

    let mut ok = report.is_complete();

    if ok {
        match check_client(&config) {
            Ok(()) => println!("\n✅ Coze client initialized"),
            Err(e) => {
                println!("\n❌ Coze client initialization failed: {}", e);
                ok = false;
            }
        }
    } else {
        println!("\nSet COZE_API_KEY and COZE_WORKFLOW_ID in .env, then restart the gateway.");
    }

    match probe_gateway(&config.gateway_url).await {
        Ok(health) => println!(
            "✅ gateway at {} is up ({}, {} mode)",
            config.gateway_url, health.service, health.mode
        ),
        Err(e) => {
            println!("❌ gateway at {} is unreachable: {}", config.gateway_url, e);
            ok = false;
        }
    }

    println!("\n{}\n", rule);

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}
