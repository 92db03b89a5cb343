//! Health and safety reference material shown alongside results.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct EducationTopic {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub risks: &'static [&'static str],
    pub prevention: &'static [&'static str],
    pub signs: &'static [&'static str],
    pub actions: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EmergencyContact {
    pub name: &'static str,
    pub number: &'static str,
}

pub const FEDERAL_ASSISTANCE_URL: &str = "https://www.disasterassistance.gov/";

pub const EMERGENCY_CONTACTS: &[EmergencyContact] = &[
    EmergencyContact {
        name: "Emergency Services",
        number: "911",
    },
    EmergencyContact {
        name: "Poison Control",
        number: "1-800-222-1222",
    },
    EmergencyContact {
        name: "Gas Emergency",
        number: "1-800-427-2200",
    },
    EmergencyContact {
        name: "Electric Emergency",
        number: "1-800-611-1911",
    },
    EmergencyContact {
        name: "DFS Disaster Hotline",
        number: "1-800-339-1759",
    },
];

pub const TOPICS: &[EducationTopic] = &[
    EducationTopic {
        id: "mold",
        title: "Mold & Moisture",
        description: "Understanding mold growth and health impacts",
        risks: &[
            "Respiratory problems and allergic reactions",
            "Asthma triggers and breathing difficulties",
            "Skin and eye irritation",
            "Toxic mold exposure (black mold)",
        ],
        prevention: &[
            "Control moisture levels below 60% humidity",
            "Fix water leaks immediately",
            "Ensure proper ventilation",
            "Use dehumidifiers in damp areas",
        ],
        signs: &[
            "Musty odors",
            "Visible mold growth",
            "Water stains or discoloration",
            "Peeling paint or wallpaper",
        ],
        actions: &[
            "Wear N95 masks during cleanup",
            "Use bleach solution (1:10 ratio)",
            "Remove contaminated materials",
            "Call professionals for large areas (>10 sq ft)",
        ],
    },
    EducationTopic {
        id: "water-quality",
        title: "Water Quality",
        description: "Safe water practices after disasters",
        risks: &[
            "Bacterial contamination (E. coli, Salmonella)",
            "Chemical pollutants",
            "Sewage contamination",
            "Heavy metals and toxins",
        ],
        prevention: &[
            "Use bottled or boiled water for drinking",
            "Test well water after flooding",
            "Disinfect water systems",
            "Avoid contact with standing water",
        ],
        signs: &[
            "Unusual taste, color, or odor",
            "Cloudiness or particles",
            "Gastrointestinal illness",
            "Skin irritation after contact",
        ],
        actions: &[
            "Boil water for 1 minute before use",
            "Use water purification tablets",
            "Contact local health department",
            "Have water professionally tested",
        ],
    },
    EducationTopic {
        id: "electrical",
        title: "Electrical Hazards",
        description: "Electrical safety after damage",
        risks: &[
            "Electrocution and electrical shock",
            "Electrical fires",
            "Carbon monoxide from generators",
            "Arc flash injuries",
        ],
        prevention: &[
            "Turn off main power if flooding occurs",
            "Keep generators outside and away from windows",
            "Use GFCI outlets in wet areas",
            "Never touch electrical equipment with wet hands",
        ],
        signs: &[
            "Buzzing or crackling sounds",
            "Burning smell",
            "Sparks or arcing",
            "Warm outlets or switches",
        ],
        actions: &[
            "Call licensed electrician immediately",
            "Stay away from downed power lines",
            "Use flashlights instead of candles",
            "Never use water on electrical fires",
        ],
    },
    EducationTopic {
        id: "flooring",
        title: "Flooring Issues",
        description: "Flooring damage and health concerns",
        risks: &[
            "Slip and fall hazards",
            "Mold growth under flooring",
            "Asbestos in older flooring materials",
            "Chemical off-gassing from damaged materials",
        ],
        prevention: &[
            "Remove wet flooring within 24-48 hours",
            "Clean and dry subfloors thoroughly",
            "Test for asbestos before removal",
            "Ensure proper ventilation during work",
        ],
        signs: &[
            "Warping, buckling, or lifting",
            "Soft spots or spongy feel",
            "Discoloration or staining",
            "Persistent odors",
        ],
        actions: &[
            "Document damage with photos",
            "Remove furniture to prevent further damage",
            "Use fans and dehumidifiers",
            "Consult flooring professionals",
        ],
    },
    EducationTopic {
        id: "roofing",
        title: "Roofing Problems",
        description: "Roof damage and safety",
        risks: &[
            "Falls from height",
            "Structural collapse",
            "Water intrusion leading to mold",
            "Hypothermia from exposure",
        ],
        prevention: &[
            "Never walk on damaged roofs",
            "Use professional roofers",
            "Install temporary tarps safely",
            "Clear debris carefully",
        ],
        signs: &[
            "Missing or damaged shingles",
            "Sagging rooflines",
            "Water stains on ceilings",
            "Daylight visible through roof",
        ],
        actions: &[
            "Secure temporary weatherproofing",
            "Document all damage",
            "Contact insurance company",
            "Get professional inspection",
        ],
    },
    EducationTopic {
        id: "chemical",
        title: "Chemical Poisoning",
        description: "Chemical hazards and toxin exposure",
        risks: &[
            "Carbon monoxide poisoning",
            "Chemical burns and respiratory damage",
            "Lead and asbestos exposure",
            "Pesticide and fuel contamination",
        ],
        prevention: &[
            "Ventilate areas with chemical odors",
            "Use proper personal protective equipment",
            "Store chemicals safely",
            "Install CO detectors",
        ],
        signs: &[
            "Headaches, dizziness, nausea",
            "Difficulty breathing",
            "Skin or eye irritation",
            "Chemical odors",
        ],
        actions: &[
            "Move to fresh air immediately",
            "Call Poison Control: 1-800-222-1222",
            "Flush contaminated skin/eyes with water",
            "Seek immediate medical attention",
        ],
    },
];

pub fn topic(id: &str) -> Option<&'static EducationTopic> {
    let id = id.trim();
    TOPICS.iter().find(|topic| topic.id.eq_ignore_ascii_case(id))
}
