//! Basic example: an email-verification link
//!
//! 1. Load settings from the environment (falls back to a demo secret)
//! 2. Issue a token for a freshly registered user
//! 3. Build the link that would be mailed out
//! 4. When the link is followed, run the three checks and read the user id
//!
//! Run with `RUST_LOG=tokenlink=debug` to see why tokens get rejected.

use tokenlink::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "basic=info,tokenlink=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== tokenlink - Basic Example ===\n");

    let config = TokenConfig::from_env().or_else(|e| {
        tracing::warn!("{e}; using a demo secret");
        let config = TokenConfig::new("demo-secret-do-not-use-in-production");
        config.validate().map(|_| config)
    })?;
    let service = TokenService::from_config(&config)?;

    // Step 1: Issue a token for user 42
    println!("Step 1: Issuing verification token...");
    let header = Header::new(AlgorithmId::HS256);
    let claims = Claims::new().with("userId", 42);
    let token = service.generate_with_validity(&header, &claims, &config.secret, config.validity)?;
    println!("  ✓ Valid for {} seconds\n", config.validity.as_secs());

    // Step 2: The link sent by email
    let link = format!("https://blog.example.com/verify-email/{token}");
    println!("Step 2: Link: {link}\n");

    // Step 3: The link comes back
    println!("Step 3: Checking the token...");
    let received = link.rsplit('/').next().unwrap_or_default();

    if service.is_valid(received)
        && !service.is_expired(received)
        && service.check(received, &config.secret)
    {
        let payload = service.get_payload(received)?;
        println!("  ✓ Well-formed, live and signed");
        println!("  ✓ Verifying email of user {:?}\n", payload.user_id());
    } else {
        println!("  ✗ Link is invalid or has expired\n");
    }

    // Step 4: A tampered link
    println!("Step 4: Checking a tampered token...");
    let forged = service.generate(&header, &Claims::new().with("userId", 1), "guessed-secret")?;
    match service.verify(&forged, &config.secret) {
        Ok(claims) => println!("  ✗ Accepted user {:?}", claims.user_id()),
        Err(e) => println!("  ✓ Rejected: {e}"),
    }

    Ok(())
}
