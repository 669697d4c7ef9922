use tasador::{CandidateSummary, ExtractionVerbose, PassSummary};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const MAGENTA: &str = "\x1b[35m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

pub fn print_run(res: &ExtractionVerbose, color: bool) {
    let palette = ansi::Palette::new(color);
    let details = &res.details;
    let extraction = &res.extraction;

    println!("\n{}", palette.bold(palette.paint(format!("⚙  Title: \"{}\"", res.text), ansi::CYAN)));
    println!("   {} {}", palette.dim("normalized:"), details.normalized);
    println!(
        "   {} {} {}",
        palette.dim("type:"),
        palette.bold(palette.paint(extraction.product_type.as_str(), ansi::MAGENTA)),
        palette.dim(format!("({:?})", extraction.type_source)),
    );

    println!("\n{}", palette.paint("━━━ Passes ━━━", ansi::GRAY));
    for pass in &details.passes {
        print_pass(pass, &palette);
    }

    println!("\n{}", palette.paint("━━━ Candidates ━━━", ansi::GRAY));
    if details.candidates.is_empty() {
        println!("{}", palette.dim("  No candidates found"));
        println!("\n{}", palette.paint("Possible reasons:", ansi::YELLOW));
        println!("  • Rules were filtered out (check bucket/phrase requirements)");
        println!("  • Diamond rules need BRILLANTE or DIAMANTE in the title");
        println!("  • Production functions returned None");
        println!("\n{}", palette.dim("  Tip: Set RUST_LOG=tasador=debug to see rule filtering details"));
    } else {
        for (idx, candidate) in details.candidates.iter().enumerate() {
            print_candidate(idx, candidate, &palette);
        }
    }

    println!("\n{}", palette.paint("━━━ Attributes ━━━", ansi::GRAY));
    if extraction.attributes.is_empty() {
        println!("{}", palette.dim("  (none)"));
    }
    for (key, value) in extraction.attributes.iter() {
        println!("  {} {}", palette.paint(format!("{:<22}", key.as_str()), ansi::BLUE), palette.bold(value.to_string()));
    }

    if !extraction.conflicts.is_empty() {
        println!("\n{}", palette.paint("━━━ Conflicts ━━━", ansi::GRAY));
        for conflict in &extraction.conflicts {
            println!(
                "  {} {} {} {} {}",
                palette.paint(conflict.key.as_str(), ansi::YELLOW),
                palette.dim(&conflict.replaced),
                palette.dim("→"),
                palette.bold(&conflict.kept),
                palette.dim(format!("({})", conflict.rule)),
            );
        }
    }

    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!(
        "  Total: {}  │  Sweep: {}  │  Resolve: {}",
        palette.paint(format!("{:?}", details.total), ansi::GREEN),
        palette.paint(format!("{:?}", details.sweep_total), ansi::CYAN),
        palette.dim(format!("{:?}", details.resolve)),
    );
    println!("  {} {}", palette.dim("active rules:"), palette.dim(details.active_rules.join(", ")));
    println!();
}

fn print_pass(pass: &PassSummary, palette: &ansi::Palette) {
    println!(
        "  {} {}  {}",
        palette.paint(format!("{:<12}", pass.dimension), ansi::BLUE),
        if pass.produced > 0 {
            palette.paint(format!("✓ {} nodes", pass.produced), ansi::GREEN)
        } else {
            palette.dim(format!("✗ {} nodes", pass.produced))
        },
        palette.dim(format!("rules {} │ hits {} │ {:?}", pass.rules_considered, pass.matches, pass.duration)),
    );
}

fn print_candidate(idx: usize, candidate: &CandidateSummary, palette: &ansi::Palette) {
    let outcome = match (&candidate.attribute, &candidate.value) {
        (Some(key), Some(value)) => palette.bold(palette.paint(format!("{} = {}", key.as_str(), value), ansi::GREEN)),
        _ => palette.dim("(no attribute)"),
    };
    println!(
        "  {} {} {} {}",
        palette.paint(format!("[{}]", idx), ansi::GRAY),
        outcome,
        palette.dim("│"),
        palette.paint(format!("span {}..{} \"{}\"", candidate.start, candidate.end, candidate.body), ansi::YELLOW),
    );
    println!(
        "      {} {}  {} {}  {}",
        palette.dim("dim:"),
        palette.paint(candidate.dimension, ansi::BLUE),
        palette.dim("│ rule:"),
        palette.paint(candidate.rule, ansi::CYAN),
        palette.dim(&candidate.preview),
    );
}
