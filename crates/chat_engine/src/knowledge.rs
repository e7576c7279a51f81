//! Keyword table for the local responder.
//!
//! All keywords are lower-case. Personal keywords are matched as whole
//! words; every other group is a plain substring match.

/// Canned answer for one known project.
#[derive(Debug)]
pub struct ProjectTopic {
    pub project_id: u32,
    /// Name used in the topic menu.
    pub short_name: &'static str,
    pub keywords: &'static [&'static str],
    pub summary: &'static str,
}

#[derive(Debug)]
pub struct KnowledgeTable {
    pub personal_keywords: &'static [&'static str],
    pub project_topics: &'static [ProjectTopic],
    pub skill_keywords: &'static [&'static str],
    pub project_keywords: &'static [&'static str],
    pub contact_keywords: &'static [&'static str],
}

pub static KNOWLEDGE: KnowledgeTable = KnowledgeTable {
    personal_keywords: &[
        "personal",
        "family",
        "girlfriend",
        "boyfriend",
        "relationship",
        "private",
        "age",
        "birthday",
        "address",
        "phone",
    ],
    project_topics: &[
        ProjectTopic {
            project_id: 1,
            short_name: "Deepfake Detection",
            keywords: &["deepfake", "fake"],
            summary: "The Deepfake Detection project uses ConvNeXt/ViT-based models achieving 94% \
                      accuracy. It's a full-stack web app with Streamlit/Flask backend and real-time \
                      video frame analysis. Technologies: PyTorch, Computer Vision, Flask. It's \
                      currently deployed and active!",
        },
        ProjectTopic {
            project_id: 2,
            short_name: "TrackBot",
            keywords: &["trackbot", "railway"],
            summary: "TrackBot is a production-ready IoT system for railway crack detection using \
                      ultrasonic sensors and vibration analysis. It has a real-time reporting \
                      dashboard for maintenance teams. Built with Raspberry Pi, Python, and MQTT \
                      protocol.",
        },
        ProjectTopic {
            project_id: 3,
            short_name: "Autonomous Dustbin",
            keywords: &["dustbin", "waste"],
            summary: "The Autonomous Dustbin is a smart waste management system with 7-sensor \
                      classification for metal, plastic, glass, and organic materials. It features \
                      solar power management and automated sorting mechanisms using Arduino and ML.",
        },
        ProjectTopic {
            project_id: 4,
            short_name: "VocalEmotion",
            keywords: &["vocal", "emotion"],
            summary: "VocalEmotion is an ML-powered system that detects 7 emotions from voice with \
                      87% accuracy using LSTM networks and MFCC features. Built with TensorFlow and \
                      Python for audio processing.",
        },
    ],
    skill_keywords: &["skill", "technology", "technologies"],
    project_keywords: &["project"],
    contact_keywords: &["contact", "reach", "email"],
};

impl KnowledgeTable {
    pub fn topic_for_project(&self, project_id: u32) -> Option<&ProjectTopic> {
        self.project_topics
            .iter()
            .find(|t| t.project_id == project_id)
    }
}

/// True when any keyword occurs in the (already lower-cased) text.
pub(crate) fn mentions_any(lower: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| lower.contains(k))
}
