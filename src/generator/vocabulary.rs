//! Phrase source and token sanitization
//!
//! Tokens are built from short business-speak phrases and sanitized into
//! `[a-z0-9_]`. This layer makes no uniqueness promise; callers dedupe.

use rand::seq::SliceRandom;
use rand::Rng;

const BUZZ_VERBS: &[&str] = &[
    "aggregate", "architect", "benchmark", "brand", "cultivate", "deliver", "deploy", "disintermediate",
    "drive", "e-enable", "embrace", "empower", "enable", "engage", "engineer", "enhance", "envisioneer",
    "evolve", "expedite", "exploit", "extend", "facilitate", "generate", "grow", "harness", "implement",
    "incentivize", "incubate", "innovate", "integrate", "iterate", "leverage", "matrix", "maximize",
    "mesh", "monetize", "morph", "optimize", "orchestrate", "productize", "recontextualize", "reinvent",
    "repurpose", "revolutionize", "scale", "seize", "strategize", "streamline", "syndicate",
    "synergize", "synthesize", "target", "transform", "transition", "unleash", "utilize", "visualize",
    "whiteboard",
];

const BUZZ_ADJECTIVES: &[&str] = &[
    "back-end", "best-of-breed", "bleeding-edge", "bricks-and-clicks", "clicks-and-mortar",
    "collaborative", "compelling", "cross-platform", "cross-media", "customized", "cutting-edge",
    "distributed", "dot-com", "dynamic", "e-business", "efficient", "end-to-end", "enterprise",
    "extensible", "frictionless", "front-end", "global", "granular", "holistic", "impactful",
    "innovative", "integrated", "interactive", "intuitive", "killer", "leading-edge", "magnetic",
    "mission-critical", "next-generation", "one-to-one", "open-source", "out-of-the-box",
    "plug-and-play", "proactive", "real-time", "revolutionary", "rich", "robust", "scalable",
    "seamless", "sexy", "sticky", "strategic", "synergistic", "transparent", "turn-key",
    "ubiquitous", "user-centric", "value-added", "vertical", "viral", "virtual", "visionary",
    "web-enabled", "wireless", "world-class",
];

const BUZZ_NOUNS: &[&str] = &[
    "action-items", "applications", "architectures", "bandwidth", "channels", "communities",
    "content", "convergence", "deliverables", "e-business", "e-commerce", "e-markets",
    "e-services", "e-tailers", "experiences", "eyeballs", "functionalities", "infomediaries",
    "infrastructures", "initiatives", "interfaces", "markets", "methodologies", "metrics",
    "mindshare", "models", "networks", "niches", "paradigms", "partnerships", "platforms",
    "portals", "relationships", "roi", "schemas", "solutions", "supply-chains", "synergies",
    "systems", "technologies", "users", "vortals", "web-readiness", "web-services",
];

const CATCH_ADJECTIVES: &[&str] = &[
    "Adaptive", "Advanced", "Ameliorated", "Assimilated", "Automated", "Balanced",
    "Business-focused", "Centralized", "Cloned", "Compatible", "Configurable", "Cross-group",
    "Customer-focused", "Customizable", "Decentralized", "De-engineered", "Devolved", "Digitized",
    "Distributed", "Diverse", "Enhanced", "Enterprise-wide", "Ergonomic", "Exclusive", "Expanded",
    "Extended", "Face-to-face", "Focused", "Front-line", "Fully-configurable", "Fundamental",
    "Future-proofed", "Grass-roots", "Horizontal", "Implemented", "Innovative", "Integrated",
    "Intuitive", "Inverse", "Managed", "Mandatory", "Monitored", "Multi-channelled",
    "Multi-layered", "Multi-tiered", "Networked", "Object-based", "Open-architected",
    "Open-source", "Operative", "Optimized", "Optional", "Organic", "Organized", "Persevering",
    "Persistent", "Phased", "Polarised", "Pre-emptive", "Proactive", "Profit-focused",
    "Profound", "Programmable", "Progressive", "Public-key", "Quality-focused", "Re-contextualized",
    "Re-engineered", "Reactive", "Realigned", "Reduced", "Reverse-engineered", "Right-sized",
    "Robust", "Seamless", "Secured", "Self-enabling", "Sharable", "Stand-alone", "Streamlined",
    "Switchable", "Synchronised", "Synergistic", "Team-oriented", "Total", "Triple-buffered",
    "Universal", "Up-sized", "Upgradable", "User-centric", "User-friendly", "Versatile",
    "Virtual", "Visionary",
];

const CATCH_DESCRIPTORS: &[&str] = &[
    "actuating", "analyzing", "asymmetric", "asynchronous", "attitude-oriented", "background",
    "bandwidth-monitored", "bi-directional", "bifurcated", "bottom-line", "client-driven",
    "client-server", "coherent", "cohesive", "composite", "content-based", "context-sensitive",
    "contextually-based", "dedicated", "demand-driven", "didactic", "directional", "discrete",
    "disintermediate", "dynamic", "eco-centric", "empowering", "encompassing", "even-keeled",
    "executive", "explicit", "exuding", "fault-tolerant", "foreground", "fresh-thinking",
    "full-range", "global", "heuristic", "high-level", "holistic", "homogeneous", "hybrid",
    "impactful", "incremental", "intangible", "interactive", "intermediate", "leading-edge",
    "local", "logistical", "maximized", "methodical", "mission-critical", "mobile", "modular",
    "motivating", "multimedia", "multi-state", "multi-tasking", "national", "needs-based",
    "neutral", "next-generation", "non-volatile", "object-oriented", "optimal", "optimizing",
    "radical", "real-time", "reciprocal", "regional", "responsive", "scalable", "secondary",
    "solution-oriented", "stable", "static", "system-worthy", "systematic", "systemic",
    "tangible", "tertiary", "transitional", "uniform", "upward-trending", "user-facing",
    "value-added", "web-enabled", "well-modulated", "zero-administration", "zero-defect",
    "zero-tolerance",
];

const CATCH_NOUNS: &[&str] = &[
    "ability", "access", "adapter", "algorithm", "alliance", "analyzer", "application", "approach",
    "architecture", "archive", "array", "artificial-intelligence", "attitude", "benchmark",
    "budgetary-management", "capability", "capacity", "challenge", "circuit", "collaboration",
    "complexity", "concept", "conglomeration", "contingency", "core", "customer-loyalty",
    "database", "data-warehouse", "definition", "emulation", "encoding", "encryption",
    "extranet", "firmware", "flexibility", "focus-group", "forecast", "frame", "framework",
    "function", "functionalities", "graphic-interface", "groupware", "hardware", "help-desk",
    "hierarchy", "hub", "implementation", "info-mediaries", "infrastructure", "initiative",
    "installation", "instruction-set", "interface", "internet-solution", "intranet",
    "knowledge-user", "knowledge-base", "local-area-network", "leverage", "matrices",
    "matrix", "methodology", "middleware", "migration", "model", "moderator", "monitoring",
    "moratorium", "neural-net", "open-architecture", "open-system", "orchestration", "paradigm",
    "parallelism", "policy", "portal", "pricing-structure", "process-improvement", "product",
    "productivity", "project", "projection", "protocol", "secured-line", "service-desk",
    "software", "solution", "standardization", "strategy", "structure", "success", "superstructure",
    "support", "synergy", "system-engine", "task-force", "throughput", "time-frame", "toolset",
    "utilisation", "website", "workforce",
];

/// Kinds of phrase the vocabulary can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhraseKind {
    /// `verb adjective noun`, used for label names
    BuzzPhrase,
    /// `Adjective descriptor noun`, used for metric names
    CatchPhrase,
    /// A single catch-phrase noun, used for label values
    CatchPhraseNoun,
}

/// Produce a raw, human-readable phrase of the given kind
pub fn phrase<R: Rng + ?Sized>(kind: PhraseKind, rng: &mut R) -> String {
    match kind {
        PhraseKind::BuzzPhrase => format!(
            "{} {} {}",
            pick(BUZZ_VERBS, rng),
            pick(BUZZ_ADJECTIVES, rng),
            pick(BUZZ_NOUNS, rng)
        ),
        PhraseKind::CatchPhrase => format!(
            "{} {} {}",
            pick(CATCH_ADJECTIVES, rng),
            pick(CATCH_DESCRIPTORS, rng),
            pick(CATCH_NOUNS, rng)
        ),
        PhraseKind::CatchPhraseNoun => pick(CATCH_NOUNS, rng).to_string(),
    }
}

/// Replace every character outside `[a-zA-Z0-9_]` with `_`, then lower-case
pub fn sanitize(phrase: &str) -> String {
    phrase
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// Draw a sanitized token of the given kind
pub fn next_token<R: Rng + ?Sized>(kind: PhraseKind, rng: &mut R) -> String {
    sanitize(&phrase(kind, rng))
}

/// Number of distinct tokens a kind can produce
pub fn vocabulary_size(kind: PhraseKind) -> usize {
    match kind {
        PhraseKind::BuzzPhrase => BUZZ_VERBS.len() * BUZZ_ADJECTIVES.len() * BUZZ_NOUNS.len(),
        PhraseKind::CatchPhrase => {
            CATCH_ADJECTIVES.len() * CATCH_DESCRIPTORS.len() * CATCH_NOUNS.len()
        }
        PhraseKind::CatchPhraseNoun => CATCH_NOUNS.len(),
    }
}

fn pick<'a, R: Rng + ?Sized>(words: &[&'a str], rng: &mut R) -> &'a str {
    words.choose(rng).copied().unwrap_or("none")
}
