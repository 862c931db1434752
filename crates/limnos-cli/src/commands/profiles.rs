use limnos_core::error::LimnosError;
use limnos_core::profile::builtin;
use limnos_core::profile::schema::{MatchFields, Profile};
use std::path::Path;

pub fn list() -> Result<(), LimnosError> {
    println!("Available predefined profiles:\n");
    for name in builtin::PRESETS {
        let profile = builtin::load_preset(name)?;
        let default_marker = if *name == builtin::DEFAULT_PRESET {
            " [default]"
        } else {
            ""
        };
        println!(
            "  {:<14} {} (v{}){}",
            name, profile.name, profile.version, default_marker
        );
        if let Some(ref desc) = profile.description {
            println!("                 {}", desc);
        }
        println!();
    }
    Ok(())
}

pub fn show(preset: &str) -> Result<(), LimnosError> {
    let profile = builtin::load_preset(preset)?;
    describe(&profile);
    Ok(())
}

fn describe(profile: &Profile) {
    println!("{} (version {})\n", profile.name, profile.version);

    if let Some(ref desc) = profile.description {
        println!("{}\n", desc);
    }

    println!("Substance families:\n");
    for family in &profile.families {
        print!("  {}", family.name);
        if let Some(ref desc) = family.description {
            println!(" -- {}", desc);
        } else {
            println!();
        }

        if !family.keywords.is_empty() {
            let fields = match family.fields {
                MatchFields::Label => "label",
                MatchFields::Definition => "definition",
                MatchFields::Both => "label or definition",
            };
            println!(
                "    keywords in {}: {}",
                fields,
                family.keywords.join(", ")
            );
        }
        if !family.unit_labels.is_empty() {
            println!("    unit labels: {}", family.unit_labels.join(", "));
        }
        match profile.threshold(&family.name) {
            Some(t) => println!(
                "    safety tiers: safe <= {}, warning <= {}, danger above",
                t,
                2.0 * t
            ),
            None => println!("    safety tiers: none"),
        }
        println!();
    }

    let c = &profile.compliance;
    println!("Compliance (share of '{}' determinands per location):\n", c.family);
    println!("  Compliant       below {}%", c.caution_pct);
    println!(
        "  Caution         {}% to {}% inclusive",
        c.caution_pct, c.non_compliant_pct
    );
    println!("  Non-Compliant   above {}%", c.non_compliant_pct);
    println!();
}

pub fn validate(file: &Path) -> Result<(), LimnosError> {
    let profile = limnos_core::profile::load_profile(file)?;

    println!("Profile '{}' (v{}) is valid.", profile.name, profile.version);
    let names: Vec<&str> = profile.families.iter().map(|f| f.name.as_str()).collect();
    println!("  Families: {}", names.join(", "));
    println!("  Thresholds: {}", profile.thresholds.len());
    println!("  Compliance family: {}", profile.compliance.family);

    // Warnings, not errors
    let mut warnings = Vec::new();
    for family in &profile.families {
        if profile.threshold(&family.name).is_none() {
            warnings.push(format!(
                "family '{}' has no threshold; `tiers` will reject it",
                family.name
            ));
        }
        if family.keywords.iter().any(|k| k.trim().is_empty()) {
            warnings.push(format!(
                "family '{}' has a whitespace-only keyword",
                family.name
            ));
        }
    }

    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }

    Ok(())
}
