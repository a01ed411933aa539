//! Response and question templates
//!
//! Canned greeting/acknowledgment replies, the fixed follow-up question
//! texts per language, fallback messages, and the prompt framings
//! prepended to knowledge-engine queries. Languages without localized
//! texts fall back to English.

use serde::{Deserialize, Serialize};

use farm_advisor_core::Language;

/// Which canned greeting reply to use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GreetingVariant {
    Morning,
    Afternoon,
    Evening,
    Neutral,
    Thanks,
}

/// Scheduled clarification questions.
///
/// The full (general advisory) schedule runs CropStage, SoilIrrigation,
/// FertilizersUsed in order; the reduced diagnosis schedule only ever asks
/// CropOnly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionSlot {
    CropStage,
    SoilIrrigation,
    FertilizersUsed,
    CropOnly,
}

impl QuestionSlot {
    /// The full schedule, in asking order.
    pub fn full_schedule() -> &'static [QuestionSlot] {
        &[QuestionSlot::CropStage, QuestionSlot::SoilIrrigation, QuestionSlot::FertilizersUsed]
    }

    /// The reduced diagnosis schedule.
    pub fn diagnosis_schedule() -> &'static [QuestionSlot] {
        &[QuestionSlot::CropOnly]
    }
}

/// Template store.
#[derive(Debug, Clone, Default)]
pub struct ResponseTemplates;

impl ResponseTemplates {
    pub fn new() -> Self {
        Self
    }

    /// Canned greeting/acknowledgment reply.
    pub fn greeting(&self, variant: GreetingVariant, language: Language) -> &'static str {
        match (variant, language) {
            (GreetingVariant::Morning, Language::Telugu) => {
                "శుభోదయం! నేను ఫార్మ్ వైద్య, మీ వ్యవసాయ సహాయకుడిని. ఈరోజు మీ వ్యవసాయ అవసరాలకు నేను ఎలా సహాయపడగలను?"
            }
            (GreetingVariant::Morning, Language::Hindi) => {
                "शुभ प्रभात! मैं फार्मवैद्य हूं, आपका कृषि सहायक। आज मैं आपकी कैसे मदद कर सकता हूं?"
            }
            (GreetingVariant::Morning, _) => {
                "Good morning! I'm FarmVaidya, your agricultural assistant. How can I help you with your farming needs today?"
            }
            (GreetingVariant::Afternoon, Language::Telugu) => {
                "నమస్కారం! నేను ఫార్మ్ వైద్య. ఈ మధ్యాహ్నం మీ వ్యవసాయ ప్రశ్నలకు నేను ఎలా సహాయపడగలను?"
            }
            (GreetingVariant::Afternoon, Language::Hindi) => {
                "नमस्ते! मैं फार्मवैद्य हूं। आज दोपहर मैं आपकी कैसे मदद कर सकता हूं?"
            }
            (GreetingVariant::Afternoon, _) => {
                "Good afternoon! I'm FarmVaidya, your agricultural assistant. How may I help you?"
            }
            (GreetingVariant::Evening, Language::Telugu) => {
                "శుభ సాయంత్రం! నేను ఫార్మ్ వైద్య. మీ పంటల గురించి ఏమైనా అడగండి."
            }
            (GreetingVariant::Evening, Language::Hindi) => {
                "शुभ संध्या! मैं फार्मवैद्य हूं। अपनी फसलों के बारे में कुछ भी पूछें।"
            }
            (GreetingVariant::Evening, _) => {
                "Good evening! I'm FarmVaidya, your agricultural assistant. How can I help you today?"
            }
            (GreetingVariant::Thanks, Language::Telugu) => {
                "సంతోషం! మీకు ఇంకా ఏమైనా వ్యవసాయ ప్రశ్నలు ఉంటే అడగండి."
            }
            (GreetingVariant::Thanks, Language::Hindi) => {
                "आपका स्वागत है! खेती से जुड़ा कोई और सवाल हो तो जरूर पूछें।"
            }
            (GreetingVariant::Thanks, _) => {
                "You're welcome! Feel free to ask if you have any more farming questions."
            }
            (GreetingVariant::Neutral, Language::Telugu) => {
                "నమస్కారం! నేను ఫార్మ్ వైద్య, మీ వ్యవసాయ సహాయకుడిని. ఈరోజు మీ వ్యవసాయ అవసరాలకు నేను ఎలా సహాయపడగలను?"
            }
            (GreetingVariant::Neutral, Language::Hindi) => {
                "नमस्ते! मैं फार्मवैद्य हूं, आपका कृषि सहायक। मैं आज आपकी कैसे मदद कर सकता हूं?"
            }
            (GreetingVariant::Neutral, _) => {
                "Hello! I'm FarmVaidya, your agricultural assistant. How can I help you with your farming needs today?"
            }
        }
    }

    /// Fixed text of a scheduled question.
    pub fn question(&self, slot: QuestionSlot, language: Language) -> &'static str {
        match (slot, language) {
            (QuestionSlot::CropStage, Language::Telugu) => {
                "మీరు ఏ పంట సాగు చేస్తున్నారు? అది ఏ దశలో ఉంది - ప్రారంభ, మధ్య, లేదా కోతకు దగ్గరగా?"
            }
            (QuestionSlot::CropStage, Language::Hindi) => {
                "आप कौन सी फसल उगा रहे हैं और वह किस अवस्था में है - शुरुआती, मध्य, या कटाई के करीब?"
            }
            (QuestionSlot::CropStage, _) => {
                "Which crop are you growing, and what stage is it at - early, mid, or near harvest?"
            }
            (QuestionSlot::SoilIrrigation, Language::Telugu) => {
                "మీ నేల ఏ రకం - ఎర్ర, నల్ల, లేదా లోమీ? మీరు ఏ నీటిపారుదల పద్ధతి వాడుతున్నారు - డ్రిప్, స్ప్రింక్లర్, లేదా వరద?"
            }
            (QuestionSlot::SoilIrrigation, Language::Hindi) => {
                "आपकी मिट्टी किस प्रकार की है - लाल, काली, या दोमट? और आप कौन सी सिंचाई विधि उपयोग कर रहे हैं - ड्रिप, स्प्रिंकलर, या बाढ़?"
            }
            (QuestionSlot::SoilIrrigation, _) => {
                "What type of soil do you have - red, black, or loamy - and what irrigation method are you using - drip, sprinkler, or flood?"
            }
            (QuestionSlot::FertilizersUsed, Language::Telugu) => {
                "ఈ పంటకు మీరు ఇప్పటికే ఏ ఎరువులు లేదా పురుగుమందులు వాడారు?"
            }
            (QuestionSlot::FertilizersUsed, Language::Hindi) => {
                "इस फसल पर आपने अब तक कौन से उर्वरक या कीटनाशक इस्तेमाल किए हैं?"
            }
            (QuestionSlot::FertilizersUsed, _) => {
                "Which fertilizers or pesticides have you already used on this crop?"
            }
            (QuestionSlot::CropOnly, Language::Telugu) => {
                "మీకు ఈ సమస్య ఏ పంటలో కనిపిస్తోంది?"
            }
            (QuestionSlot::CropOnly, Language::Hindi) => {
                "यह समस्या आपको किस फसल में दिख रही है?"
            }
            (QuestionSlot::CropOnly, _) => "Which crop are you seeing this problem on?",
        }
    }

    /// All language variants of a question, for already-asked detection.
    pub fn question_variants(&self, slot: QuestionSlot) -> impl Iterator<Item = &'static str> + '_ {
        [Language::English, Language::Telugu, Language::Hindi]
            .into_iter()
            .map(move |lang| self.question(slot, lang))
    }

    /// Nudge appended to general product answers when no crop was ever
    /// mentioned in the conversation.
    pub fn crop_nudge(&self, language: Language) -> &'static str {
        match language {
            Language::Telugu => "\n\nమీరు ఏ పంట కోసం అడుగుతున్నారో చెబితే, మరింత కచ్చితమైన సలహా ఇవ్వగలను.",
            Language::Hindi => "\n\nअगर आप बताएं कि यह किस फसल के लिए है, तो मैं और सटीक सलाह दे सकता हूं।",
            _ => "\n\nIf you tell me which crop this is for, I can give more specific advice.",
        }
    }

    /// Last-resort reply when neither the engine nor the offline tables
    /// produce an answer.
    pub fn consult_fallback(&self, language: Language) -> &'static str {
        match language {
            Language::Telugu => {
                "క్షమించండి, ఈ ప్రశ్నకు నా దగ్గర తగిన సమాచారం లేదు. దయచేసి మీ స్థానిక వ్యవసాయ అధికారిని సంప్రదించండి."
            }
            Language::Hindi => {
                "क्षमा करें, इस प्रश्न के लिए मेरे पास पर्याप्त जानकारी नहीं है। कृपया अपने स्थानीय कृषि अधिकारी से संपर्क करें।"
            }
            _ => {
                "Sorry, I don't have enough information for this question. Please consult your local agricultural officer for region-specific guidance."
            }
        }
    }

    /// Header line of the dosage recap.
    pub fn summary_header(&self, language: Language) -> &'static str {
        match language {
            Language::Telugu => "ఇప్పటివరకు చర్చించిన మోతాదులు:",
            Language::Hindi => "अब तक चर्चा की गई मात्राएं:",
            _ => "Dosages discussed so far:",
        }
    }

    /// Framing prepended to diagnosis finalization queries.
    pub fn diagnosis_framing(&self) -> &'static str {
        "You are FarmVaidya, an expert agricultural advisor. A farmer reported a crop problem. \
         Using the details below, respond with: 1. DIAGNOSIS: identify the specific problem. \
         2. ROOT CAUSE: the likely cause. 3. TREATMENT: specific products and doses. \
         4. PREVENTION: how to avoid recurrence. Respond in the language of the farmer's question."
    }

    /// Framing prepended to general advisory finalization queries.
    pub fn advisory_framing(&self) -> &'static str {
        "You are FarmVaidya, an expert agricultural advisor. Using the farm details below, \
         give a complete recommendation covering fertilizer doses, application schedule, and \
         irrigation management. Be specific with quantities per acre and timing. \
         Respond in the language of the farmer's question."
    }

    /// Framing for factual/company questions: answer only from indexed
    /// facts, never guess.
    pub fn factual_framing(&self) -> &'static str {
        "Answer the following factual question strictly from the knowledge base. \
         If the information is not available, say so plainly; do not guess."
    }

    /// Framing for general product-knowledge questions.
    pub fn knowledge_framing(&self) -> &'static str {
        "You are FarmVaidya, an agricultural product specialist. Explain clearly \
         and specifically, including dosage and application method when known."
    }
}
