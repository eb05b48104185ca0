//! Home screen command.
//!
//! Plays the intro reveal with the configured timings, then prints the browse
//! screen. Ctrl-C during the intro tears the reveal down and nothing is shown.

use shopeasy_storefront::catalog::{self, PROMO_BANNER};
use shopeasy_storefront::config::StorefrontConfig;
use shopeasy_storefront::navigation::{Navigator, Route};
use shopeasy_storefront::reveal::{FadeIn, RevealDriver};

/// Run the reveal, then print the browse screen.
#[allow(clippy::print_stdout)]
pub async fn run(config: &StorefrontConfig, navigator: &Navigator) {
    println!("{}", super::screen_heading(navigator));

    let handle = RevealDriver::spawn(config.reveal, |fades: [FadeIn; 2]| {
        for fade in fades {
            tracing::debug!(
                target_view = ?fade.target,
                duration = ?fade.duration,
                "Fade-in started"
            );
        }
    });

    let revealed = tokio::select! {
        revealed = handle.finished() => revealed,
        _ = tokio::signal::ctrl_c() => {
            handle.teardown();
            false
        }
    };

    if !revealed {
        tracing::info!("Reveal cancelled");
        return;
    }

    for line in browse_screen() {
        println!("{line}");
    }
}

/// Everything the reveal uncovers, top to bottom.
fn browse_screen() -> Vec<String> {
    let actions = Route::HEADER_ACTIONS
        .iter()
        .map(|route| format!("{} {}", route.glyph(), route.label()))
        .collect::<Vec<_>>()
        .join("   ");

    let mut lines = vec![
        format!("{actions:>40}"),
        String::new(),
        catalog::WELCOME_LINE.to_string(),
        catalog::STORE_NAME.to_string(),
        String::new(),
        format!("[ {:<30} ] 🔍", catalog::SEARCH_PLACEHOLDER),
        String::new(),
        "Categories".to_string(),
    ];
    lines.extend(
        catalog::categories()
            .into_iter()
            .map(|category| format!("  {} {}", category.icon, category.name)),
    );

    lines.push(String::new());
    lines.push("Featured Products".to_string());
    lines.extend(catalog::featured_products().into_iter().map(|product| {
        format!(
            "  {} {:<22} {:>8}  ⭐ {:.1}",
            product.glyph,
            product.name,
            product.price.to_string(),
            product.rating
        )
    }));

    lines.push(String::new());
    lines.push(format!("{} {}", PROMO_BANNER.glyph, PROMO_BANNER.title));
    lines.push(format!("   {}", PROMO_BANNER.subtitle));
    lines.push(format!("   {}", PROMO_BANNER.code_line()));
    lines
}
