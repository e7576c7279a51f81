//! Static description of the portfolio owner.
//!
//! This is the seed for the project store and the source of the chat
//! assistant's knowledge. It is built once at startup and never mutated;
//! in-session project edits live in the project store instead.

use serde::{Deserialize, Serialize};

use crate::project::{Project, ProjectStatus};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Socials {
    pub github: String,
    pub linkedin: String,
    pub twitter: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Milestone {
    pub year: String,
    pub event: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub title: String,
    pub headline: String,
    pub bio: String,
    pub institution: String,
    pub expertise: Vec<String>,
    pub socials: Socials,
    pub projects: Vec<Project>,
    pub timeline: Vec<Milestone>,
    pub skills: Vec<String>,
}

impl Profile {
    /// First name, used in assistant replies.
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }

    /// Initials for the avatar badge.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|w| w.chars().next())
            .collect()
    }

    pub fn seed() -> Self {
        Self {
            name: "Kaustav Chakraborty".into(),
            title: "ML & Embedded Systems Student".into(),
            headline: "I build ML systems, IoT devices and web apps that make the impossible reproducible.".into(),
            bio: "Student at JIS College. I work on deepfake detection, vocal emotion recognition, \
                  TrackBot for rails, and autonomous dustbin systems. I love combining hardware \
                  with light ML models."
                .into(),
            institution: "JIS College".into(),
            expertise: strings(&[
                "Machine Learning",
                "IoT",
                "Computer Vision",
                "Embedded Systems",
            ]),
            socials: Socials {
                github: "https://github.com/Kaustav-coder-hub/".into(),
                linkedin: "https://www.linkedin.com/in/kaustav-chakraborty-2009292a9/".into(),
                twitter: None,
            },
            projects: seed_projects(),
            timeline: vec![
                milestone("2019", "Started programming; built small Arduino projects"),
                milestone("2022", "First ML project: VocalEmotion"),
                milestone("2024", "Deepfake detection web app deployed"),
            ],
            skills: strings(&[
                "Python",
                "Pytorch",
                "TensorFlow",
                "Embedded C",
                "Node.js",
                "React",
                "Tailwind",
                "Docker",
            ]),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn milestone(year: &str, event: &str) -> Milestone {
    Milestone {
        year: year.into(),
        event: event.into(),
    }
}

fn seed_projects() -> Vec<Project> {
    vec![
        Project {
            id: 1,
            title: "Deepfake Detection Web App".into(),
            short_description: "ConvNeXt/Vit-based detector with 94% accuracy. Full-stack web \
                                application with Streamlit/Flask backend and real-time video frame analysis."
                .into(),
            tags: strings(&["ML", "Computer Vision", "Flask", "Streamlit", "PyTorch"]),
            demo_file_name: None,
            status: ProjectStatus::Active,
            completion_date: "2024".into(),
            source_link: Some("https://github.com/Kaustav-coder-hub/deepfake-detection".into()),
            deployed: true,
        },
        Project {
            id: 2,
            title: "TrackBot (Railway Crack Detector)".into(),
            short_description: "Production-ready IoT system with ultrasonic sensors, vibration \
                                analysis, and real-time reporting dashboard for railway maintenance."
                .into(),
            tags: strings(&["IoT", "Embedded", "Raspberry Pi", "Python", "MQTT"]),
            demo_file_name: None,
            status: ProjectStatus::Active,
            completion_date: "2024".into(),
            source_link: None,
            deployed: false,
        },
        Project {
            id: 3,
            title: "Autonomous Dustbin System".into(),
            short_description: "Smart waste management with 7-sensor classification (metal, \
                                plastic, glass, organic), solar power management, and automated sorting mechanism."
                .into(),
            tags: strings(&["IoT", "Sustainability", "Arduino", "Machine Learning"]),
            demo_file_name: None,
            status: ProjectStatus::Completed,
            completion_date: "2023".into(),
            source_link: None,
            deployed: false,
        },
        Project {
            id: 4,
            title: "VocalEmotion Recognition".into(),
            short_description: "ML-powered emotion detection from voice with LSTM networks. \
                                Classifies 7 emotions with 87% accuracy using MFCC features."
                .into(),
            tags: strings(&["ML", "Audio Processing", "TensorFlow", "Python"]),
            demo_file_name: None,
            status: ProjectStatus::Inactive,
            completion_date: "2022".into(),
            source_link: None,
            deployed: false,
        },
    ]
}
