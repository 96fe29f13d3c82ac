// src/classify/title.rs
//! Title and content classifiers for controls / industrial automation roles

use regex::Regex;
use std::sync::LazyLock;

// ===== Target titles =====

const ENGINEER_PATTERN: &str = r"
    (controls?|automation)\s+engineer
    | (instrumentation\s*&?\s*controls?|i\s*&?\s*c)\s+engineer
    | electrical\s+controls?\s+engineer
    | plc\s+engineer
";

const LEADERSHIP_PATTERN: &str = r"
    (controls?|automation|instrumentation\s*&?\s*controls?)\s+(lead|supervisor|manager|director|head|chief)
    | (engineering\s+)?(manager|director)\s+of\s+(controls?|automation)
";

static TITLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?ix)\b( {} | {} )\b",
        ENGINEER_PATTERN, LEADERSHIP_PATTERN
    ))
    .expect("valid title regex")
});

static ENGINEER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?ix)\b( {} )\b", ENGINEER_PATTERN)).expect("valid engineer regex")
});

static LEADERSHIP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?ix)\b( {} )\b", LEADERSHIP_PATTERN)).expect("valid leadership regex")
});

static TECHNICIAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\btechnician\b").expect("valid technician regex"));

pub fn title_is_target(title: &str) -> bool {
    TITLE_RE.is_match(title)
}

pub fn title_is_engineering(title: &str) -> bool {
    ENGINEER_RE.is_match(title)
}

pub fn title_is_leadership(title: &str) -> bool {
    LEADERSHIP_RE.is_match(title)
}

pub fn title_is_technician(title: &str) -> bool {
    TECHNICIAN_RE.is_match(title)
}

// ===== Content hints =====

pub const MANUFACTURING_HINTS: &[&str] = &[
    "manufacturing", "industrial", "plant", "factory", "oem", "process", "production",
    "assembly", "operations", "control system", "control systems", "automation system",
    "automation systems", "instrumentation", "plc", "hmi", "scada", "dcs", "ladder logic",
    "iec 61131", "iec-61131", "contrologix", "compactlogix", "studio 5000", "rslogix",
    "panelview", "rockwell", "allen-bradley", "allen bradley", "siemens", "tia portal", "s7",
    "beckhoff", "codesys", "mitsubishi", "omron", "yaskawa", "fanuc", "abb robot", "kuka",
    "ur robot", "robot",
];

pub const SOFTWARE_AUTOMATION_KEYWORDS: &[&str] = &[
    "sdet", "qa", "quality assurance", "test automation", "automated testing",
    "automation tester", "qa automation", "selenium", "cypress", "playwright", "appium",
    "robot framework", "jest", "mocha", "junit", "pytest", "devops", "ci/cd", "cicd",
    "pipeline", "kubernetes", "docker", "microservices", "api automation", "web automation",
];

/// Blob mentions software/test automation work
pub fn looks_software_automation(blob: &str) -> bool {
    let lower = blob.to_lowercase();
    SOFTWARE_AUTOMATION_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// Blob carries at least one manufacturing or industrial-controls hint
pub fn looks_manufacturing(blob: &str) -> bool {
    let lower = blob.to_lowercase();
    MANUFACTURING_HINTS.iter().any(|k| lower.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engineer_titles_match() {
        for title in [
            "Controls Engineer",
            "Senior Control Engineer",
            "Automation Engineer II",
            "Instrumentation & Controls Engineer",
            "Instrumentation and Controls Engineer",
            "I&C Engineer",
            "I & C Engineer",
            "Electrical Controls Engineer",
            "PLC Engineer",
        ] {
            assert!(title_is_target(title), "{}", title);
            assert!(title_is_engineering(title), "{}", title);
        }
    }

    #[test]
    fn test_leadership_titles_match() {
        for title in [
            "Controls Manager",
            "Automation Lead",
            "Director of Automation",
            "Engineering Manager of Controls",
            "Instrumentation & Controls Supervisor",
            "Head of Controls - no",
        ] {
            let expected = !title.ends_with("- no");
            assert_eq!(title_is_target(title), expected, "{}", title);
            assert_eq!(title_is_leadership(title), expected, "{}", title);
        }
    }

    #[test]
    fn test_non_target_titles() {
        for title in ["SDET", "QA Engineer", "Software Engineer", "Controller", "Plant Manager"] {
            assert!(!title_is_target(title), "{}", title);
        }
    }

    #[test]
    fn test_engineer_and_leadership_split() {
        assert!(title_is_engineering("Controls Engineer"));
        assert!(!title_is_leadership("Controls Engineer"));
        assert!(!title_is_engineering("Director of Controls"));
    }

    #[test]
    fn test_technician() {
        assert!(title_is_technician("Controls Technician III"));
        assert!(!title_is_technician("Technicians Lounge Manager"));
    }

    #[test]
    fn test_content_hints() {
        assert!(looks_manufacturing("Controls Engineer PLC programming"));
        assert!(looks_manufacturing("support our Plant in Ohio"));
        assert!(!looks_manufacturing("Controls Engineer"));

        assert!(looks_software_automation("Automation Engineer Selenium"));
        assert!(looks_software_automation("build CI/CD for the plant"));
        assert!(!looks_software_automation("Controls Engineer PLC HMI"));
    }
}
