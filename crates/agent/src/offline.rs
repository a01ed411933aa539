//! Offline recommendation tables
//!
//! Deterministic fallback used when the knowledge engine returns the
//! no-context sentinel or fails outright: a fixed coconut-cultivation
//! table keyed by soil type, growth stage, and irrigation method. The
//! free-text parsers accept the same multilingual vocabulary the
//! extractor recognizes.

use serde::{Deserialize, Serialize};

/// Soil types the table covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoilType {
    Red,
    Black,
    Loam,
}

impl SoilType {
    /// Parse from free text; `None` when no soil vocabulary is present.
    pub fn parse(text: &str) -> Option<Self> {
        let t = text.to_lowercase();
        if t.contains("red") || t.contains("ఎర్ర") || t.contains("लाल") {
            Some(Self::Red)
        } else if t.contains("black") || t.contains("నల్ల") || t.contains("काली") {
            Some(Self::Black)
        } else if t.contains("loam") || t.contains("दोमट") {
            Some(Self::Loam)
        } else {
            None
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Red => "red soil",
            Self::Black => "black soil",
            Self::Loam => "loam soil",
        }
    }
}

/// Growth stages the table covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthStage {
    Early,
    Mid,
    NearHarvest,
}

impl GrowthStage {
    pub fn parse(text: &str) -> Option<Self> {
        let t = text.to_lowercase();
        if t.contains("early") || t.contains("seedling") || t.contains("nursery")
            || t.contains("ప్రారంభ") || t.contains("शुरुआती")
        {
            Some(Self::Early)
        } else if t.contains("mid") || t.contains("flowering") || t.contains("మధ్య") || t.contains("मध्य") {
            Some(Self::Mid)
        } else if t.contains("harvest") || t.contains("కోత") || t.contains("कटाई") {
            Some(Self::NearHarvest)
        } else {
            None
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Early => "early",
            Self::Mid => "mid",
            Self::NearHarvest => "near harvest",
        }
    }
}

/// Irrigation methods the table covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IrrigationMethod {
    Drip,
    Sprinkler,
    Flood,
}

impl IrrigationMethod {
    pub fn parse(text: &str) -> Option<Self> {
        let t = text.to_lowercase();
        if t.contains("drip") || t.contains("డ్రిప్") || t.contains("ड्रिप") {
            Some(Self::Drip)
        } else if t.contains("sprinkler") || t.contains("తుంపర") || t.contains("स्प्रिंकलर") {
            Some(Self::Sprinkler)
        } else if t.contains("flood") || t.contains("canal") || t.contains("వరద") || t.contains("बाढ़") {
            Some(Self::Flood)
        } else {
            None
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Drip => "drip",
            Self::Sprinkler => "sprinkler",
            Self::Flood => "flood",
        }
    }
}

/// Fertilizer recommendation for one soil/stage cell.
#[derive(Debug, Clone)]
pub struct FertilizerPlan {
    pub description: &'static str,
    pub nutrients: &'static str,
    pub doses: &'static [(&'static str, &'static str)],
    pub schedule: &'static str,
    pub application: &'static str,
}

/// Fertilizer recommendation keyed by soil type and growth stage.
pub fn fertilizer_plan(soil: SoilType, stage: GrowthStage) -> FertilizerPlan {
    use GrowthStage::*;
    use SoilType::*;

    match (soil, stage) {
        (Red, Early) => FertilizerPlan {
            description: "Early stage coconut in red soil",
            nutrients: "Nitrogen, Phosphorus, Potassium, Zinc, Boron",
            doses: &[
                ("Urea", "1.0 kg/tree/year"),
                ("SSP", "2.0 kg/tree/year"),
                ("MOP", "2.0 kg/tree/year"),
                ("FYM", "25 kg/tree/year"),
                ("Zinc sulphate", "50 g/tree (once in 2 years)"),
                ("Borax", "25 g/tree (once in 2 years)"),
            ],
            schedule: "Apply in split doses during June-September (SW monsoon)",
            application: "Mix with irrigation water or apply near the base after first watering",
        },
        (Red, Mid) => FertilizerPlan {
            description: "Mid-stage coconut in red soil (prime production stage)",
            nutrients: "High Nitrogen, Phosphorus, Potassium, Magnesium",
            doses: &[
                ("Urea", "1.2-1.5 kg/tree/year"),
                ("SSP", "2.0-2.5 kg/tree/year"),
                ("MOP", "2.5-3.0 kg/tree/year"),
                ("FYM", "25-30 kg/tree/year"),
                ("Magnesium sulphate", "500 g/tree/year"),
                ("Zinc sulphate", "50 g/tree (once in 2 years)"),
                ("Borax", "25 g/tree (once in 2 years)"),
            ],
            schedule: "Apply in 3-4 split doses from June-January",
            application: "Apply in two halves: June-July and October-November via drip irrigation",
        },
        (Red, NearHarvest) => FertilizerPlan {
            description: "Mature/productive coconut in red soil",
            nutrients: "Balanced NPK with micronutrients",
            doses: &[
                ("Urea", "1.0-1.2 kg/tree/year"),
                ("SSP", "2.0 kg/tree/year"),
                ("MOP", "2.5 kg/tree/year"),
                ("FYM", "25 kg/tree/year"),
                ("Zinc sulphate", "25-50 g/tree (once in 2 years)"),
            ],
            schedule: "Apply in 2 split doses",
            application: "June-July and October-November via drip system",
        },
        (Black, Early) => FertilizerPlan {
            description: "Early stage coconut in black soil",
            nutrients: "Nitrogen, Potassium, Zinc (black soil is rich in P)",
            doses: &[
                ("Urea", "0.75 kg/tree/year"),
                ("SSP", "1.5 kg/tree/year"),
                ("MOP", "2.5 kg/tree/year"),
                ("FYM", "20 kg/tree/year"),
                ("Zinc sulphate", "75-100 g/tree (once in 2 years)"),
            ],
            schedule: "Apply during monsoon (June-September)",
            application: "Apply in split doses with irrigation",
        },
        (Black, Mid) => FertilizerPlan {
            description: "Mid-stage coconut in black soil",
            nutrients: "High Nitrogen, Potassium, Micronutrients",
            doses: &[
                ("Urea", "1.25 kg/tree/year"),
                ("SSP", "1.5 kg/tree/year"),
                ("MOP", "3.0 kg/tree/year"),
                ("FYM", "25 kg/tree/year"),
                ("Zinc sulphate", "75-100 g/tree (once in 2 years)"),
                ("Borax", "50 g/tree (once in 2 years)"),
            ],
            schedule: "3 split applications",
            application: "June-July, September-October, December-January via drip",
        },
        (Black, NearHarvest) => FertilizerPlan {
            description: "Mature coconut in black soil",
            nutrients: "Balanced with emphasis on Potassium",
            doses: &[
                ("Urea", "1.0 kg/tree/year"),
                ("SSP", "1.5 kg/tree/year"),
                ("MOP", "2.5-3.0 kg/tree/year"),
                ("FYM", "20 kg/tree/year"),
            ],
            schedule: "2 split doses",
            application: "June-July and October-November",
        },
        (Loam, Early) => FertilizerPlan {
            description: "Early stage coconut in loam soil",
            nutrients: "Balanced NPK with micronutrients",
            doses: &[
                ("Urea", "0.9 kg/tree/year"),
                ("SSP", "1.75 kg/tree/year"),
                ("MOP", "2.25 kg/tree/year"),
                ("FYM", "22 kg/tree/year"),
                ("Zinc sulphate", "50 g/tree (once in 2 years)"),
            ],
            schedule: "Apply during SW monsoon",
            application: "Split in 2-3 applications from June-September",
        },
        (Loam, Mid) => FertilizerPlan {
            description: "Mid-stage coconut in loam soil (optimal fertility)",
            nutrients: "High N and K, adequate P and micronutrients",
            doses: &[
                ("Urea", "1.3 kg/tree/year"),
                ("SSP", "2.0 kg/tree/year"),
                ("MOP", "2.75 kg/tree/year"),
                ("FYM", "25 kg/tree/year"),
                ("Magnesium sulphate", "400 g/tree/year"),
                ("Zinc sulphate", "50 g/tree (once in 2 years)"),
                ("Borax", "25 g/tree (once in 2 years)"),
            ],
            schedule: "3 split applications",
            application: "June-July, September-October, December-January",
        },
        (Loam, NearHarvest) => FertilizerPlan {
            description: "Mature coconut in loam soil",
            nutrients: "Balanced with higher Potassium",
            doses: &[
                ("Urea", "1.0-1.1 kg/tree/year"),
                ("SSP", "1.75 kg/tree/year"),
                ("MOP", "2.5 kg/tree/year"),
                ("FYM", "22 kg/tree/year"),
            ],
            schedule: "2 split doses",
            application: "June-July and October-November",
        },
    }
}

/// Irrigation management for one method.
#[derive(Debug, Clone)]
pub struct IrrigationPlan {
    pub schedule: &'static str,
    pub water_requirement: &'static str,
    pub frequency: &'static str,
    pub method: &'static str,
    pub efficiency: &'static str,
}

/// Irrigation recommendation keyed by method.
pub fn irrigation_plan(method: IrrigationMethod) -> IrrigationPlan {
    match method {
        IrrigationMethod::Drip => IrrigationPlan {
            schedule: "Daily or alternate day irrigation during dry season",
            water_requirement: "40-50 liters per tree per day in summer (April-May)",
            frequency: "2-3 days interval during monsoon",
            method: "Apply near the base (drip lines 1m from trunk)",
            efficiency: "90% water use efficiency, saves 40-50% water",
        },
        IrrigationMethod::Sprinkler => IrrigationPlan {
            schedule: "3-4 days interval in dry season",
            water_requirement: "50-60 liters per tree per day in summer",
            frequency: "5-7 days interval during monsoon",
            method: "Apply in 2-3 hours before sunrise",
            efficiency: "70-80% water use efficiency",
        },
        IrrigationMethod::Flood => IrrigationPlan {
            schedule: "7-10 days interval in dry season",
            water_requirement: "60-80 liters per tree in one application",
            frequency: "15-20 days during monsoon",
            method: "Basin method, 1m radius around tree",
            efficiency: "50-60% water use efficiency, less recommended",
        },
    }
}

/// Synthesize the comprehensive yield-improvement answer from the tables.
pub fn synthesize_plan(
    soil: SoilType,
    stage: GrowthStage,
    irrigation: IrrigationMethod,
    fertilizers_used: &str,
) -> String {
    let fert = fertilizer_plan(soil, stage);
    let irrig = irrigation_plan(irrigation);

    let previous = if fertilizers_used.trim().is_empty()
        || ["none", "none used", "not yet", "no", "not provided"]
            .contains(&fertilizers_used.trim().to_lowercase().as_str())
    {
        "None yet".to_string()
    } else {
        fertilizers_used.trim().to_string()
    };

    let mut answer = String::from("COCONUT YIELD IMPROVEMENT PLAN\n\n");
    answer.push_str("Current status:\n");
    answer.push_str(&format!("- Growth stage: {}\n", stage.name()));
    answer.push_str(&format!("- Soil type: {}\n", soil.name()));
    answer.push_str(&format!("- Irrigation: {}\n", irrigation.name()));
    answer.push_str(&format!("- Previous fertilizers: {}\n", previous));

    answer.push_str("\nFertilizer recommendations (per tree per year):\n");
    for (product, dose) in fert.doses {
        answer.push_str(&format!("- {}: {}\n", product, dose));
    }
    answer.push_str(&format!("\nApplication schedule: {}\n", fert.schedule));
    answer.push_str(&format!("Application method: {}\n", fert.application));

    answer.push_str("\nIrrigation management:\n");
    answer.push_str(&format!("- Schedule: {}\n", irrig.schedule));
    answer.push_str(&format!("- Water requirement: {}\n", irrig.water_requirement));
    answer.push_str(&format!("- Method: {}\n", irrig.method));
    answer.push_str(&format!("- Efficiency: {}\n", irrig.efficiency));

    answer.push_str("\nFollow these practices:\n");
    answer.push_str("1. Apply fertilizers in split doses as per schedule\n");
    answer.push_str("2. Maintain consistent irrigation, especially during March-May\n");
    answer.push_str("3. Remove dead leaves and maintain a clean basin\n");
    answer.push_str("4. Scout for pests (rhinoceros beetle, mites) monthly\n");
    answer.push_str("5. Monitor for disease symptoms (leaf rot, bud rot)\n");
    answer.push_str("6. Ensure proper drainage to prevent waterlogging");

    if previous == "None yet" {
        answer.push_str(
            "\n\nNote: this is your first application. Follow the schedule strictly for 2-3 years to build soil fertility.",
        );
    }

    answer
}
