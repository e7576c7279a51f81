//! Deterministic local responder.
//!
//! Used whenever the remote model is unavailable. The utterance is
//! lower-cased and checked against the knowledge table in a fixed order;
//! the first group that matches decides the reply.

use regex::Regex;
use services::ProjectStore;
use shared::profile::Profile;

use crate::knowledge::{mentions_any, KnowledgeTable, KNOWLEDGE};

/// What a local reply is about, in match precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Personal,
    Project(u32),
    Skills,
    ProjectList,
    Contact,
    Menu,
}

pub struct FallbackResponder {
    profile: Profile,
    table: &'static KnowledgeTable,
    personal: Regex,
}

impl FallbackResponder {
    pub fn new(profile: Profile) -> Self {
        Self::with_table(profile, &KNOWLEDGE)
    }

    pub fn with_table(profile: Profile, table: &'static KnowledgeTable) -> Self {
        Self {
            profile,
            table,
            personal: whole_word_pattern(table.personal_keywords),
        }
    }

    pub fn classify(&self, utterance: &str) -> Topic {
        let lower = utterance.to_lowercase();

        if self.personal.is_match(&lower) {
            return Topic::Personal;
        }
        if let Some(topic) = self
            .table
            .project_topics
            .iter()
            .find(|t| mentions_any(&lower, t.keywords))
        {
            return Topic::Project(topic.project_id);
        }
        if mentions_any(&lower, self.table.skill_keywords) {
            return Topic::Skills;
        }
        if mentions_any(&lower, self.table.project_keywords) {
            return Topic::ProjectList;
        }
        if mentions_any(&lower, self.table.contact_keywords) {
            return Topic::Contact;
        }
        Topic::Menu
    }

    /// Reply for `utterance`. Project titles come from `store`, so renamed
    /// projects are listed under their new names.
    pub fn respond(&self, utterance: &str, store: &ProjectStore) -> String {
        let topic = self.classify(utterance);
        tracing::debug!(?topic, "local fallback reply");
        self.reply_for(topic, store)
    }

    pub fn reply_for(&self, topic: Topic, store: &ProjectStore) -> String {
        let first = self.profile.first_name();
        match topic {
            Topic::Personal => self.redirect_text(),
            Topic::Project(id) => match self.table.topic_for_project(id) {
                Some(t) => t.summary.to_string(),
                None => self.menu_text(),
            },
            Topic::Skills => format!(
                "{first}'s technical skills include: {}. He specializes in ML systems, IoT \
                 devices, and combining hardware with lightweight ML models.",
                self.profile.skills.join(", ")
            ),
            Topic::ProjectList => format!(
                "{first} has {} major projects: {}. Which one would you like to know more about?",
                store.len(),
                store.titles().join(", ")
            ),
            Topic::Contact => format!(
                "You can reach {first} through GitHub ({}) or LinkedIn ({}). Feel free to \
                 connect for professional collaborations!",
                self.profile.socials.github, self.profile.socials.linkedin
            ),
            Topic::Menu => self.menu_text(),
        }
    }

    /// Fixed answer to personal questions.
    pub fn redirect_text(&self) -> String {
        format!(
            "I can only discuss {}'s professional work and technical projects. Would you like \
             to know about his projects, skills, or technical expertise?",
            self.profile.first_name()
        )
    }

    fn menu_text(&self) -> String {
        let topics = self.table.project_topics;
        let names: Vec<&str> = topics.iter().map(|t| t.short_name).collect();
        format!(
            "I'm here to discuss {}'s professional work. You can ask about:\n\
             • His {} major projects ({})\n\
             • Technical skills and expertise\n\
             • Technologies he works with\n\
             • How to collaborate or get in touch",
            self.profile.first_name(),
            topics.len(),
            names.join(", ")
        )
    }
}

fn whole_word_pattern(keywords: &[&str]) -> Regex {
    let alternatives: Vec<String> = keywords.iter().map(|k| regex::escape(k)).collect();
    Regex::new(&format!(r"\b(?:{})\b", alternatives.join("|")))
        .expect("escaped keywords always form a valid pattern")
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::project::ProjectPatch;

    fn responder() -> FallbackResponder {
        FallbackResponder::new(Profile::seed())
    }

    fn store() -> ProjectStore {
        ProjectStore::new(Profile::seed().projects)
    }

    #[test]
    fn test_personal_beats_project_keywords() {
        let r = responder();
        let utterance = "is the deepfake project related to your relationship status";
        assert_eq!(r.classify(utterance), Topic::Personal);
        assert_eq!(r.respond(utterance, &store()), r.redirect_text());
    }

    #[test]
    fn test_girlfriend_question_gets_redirect() {
        let r = responder();
        let reply = r.respond("what is your girlfriend's name", &store());
        assert_eq!(reply, r.redirect_text());
        assert!(reply.starts_with("I can only discuss Kaustav's professional work"));
    }

    #[test]
    fn test_personal_keywords_need_whole_words() {
        let r = responder();
        // "age" inside "message" and "package" must not trigger the redirect
        assert_eq!(r.classify("can I message you about a package?"), Topic::Menu);
        assert_eq!(r.classify("What's your AGE?"), Topic::Personal);
    }

    #[test]
    fn test_trackbot_summary() {
        let reply = responder().respond("Tell me about TrackBot", &store());
        for needle in ["ultrasonic", "vibration", "Raspberry Pi", "MQTT"] {
            assert!(reply.contains(needle), "missing {needle} in {reply}");
        }
    }

    #[test]
    fn test_project_groups() {
        let r = responder();
        assert_eq!(r.classify("How good is the fake video detector?"), Topic::Project(1));
        assert_eq!(r.classify("railway sensors?"), Topic::Project(2));
        assert_eq!(r.classify("Waste sorting"), Topic::Project(3));
        assert_eq!(r.classify("emotion from voice"), Topic::Project(4));
    }

    #[test]
    fn test_specific_project_beats_generic_project_keyword() {
        let r = responder();
        assert_eq!(
            r.classify("Tell me about the Deepfake Detection project"),
            Topic::Project(1)
        );
    }

    #[test]
    fn test_skills_list_live_skill_set() {
        let r = responder();
        let reply = r.respond("What technologies does Kaustav use?", &store());
        assert!(reply.contains("Python, Pytorch, TensorFlow, Embedded C"));
        assert_eq!(r.classify("list your skills"), Topic::Skills);
    }

    #[test]
    fn test_skills_beat_project_list() {
        assert_eq!(
            responder().classify("which skill did each project need"),
            Topic::Skills
        );
    }

    #[test]
    fn test_project_list_reflects_store_edits() {
        let mut store = store();
        store.update(1, ProjectPatch::title("X"));

        let reply = responder().respond("tell me about your projects", &store);
        assert!(reply.contains("4 major projects"));
        assert!(reply.contains("X, TrackBot (Railway Crack Detector)"));
        assert!(!reply.contains("Deepfake Detection Web App"));
    }

    #[test]
    fn test_contact_reply_has_both_links() {
        let reply = responder().respond("How can I contact Kaustav?", &store());
        assert!(reply.contains("https://github.com/Kaustav-coder-hub/"));
        assert!(reply.contains("https://www.linkedin.com/in/kaustav-chakraborty-2009292a9/"));
    }

    #[test]
    fn test_unknown_question_gets_menu() {
        let r = responder();
        let reply = r.respond("hello there", &store());
        assert_eq!(r.classify("hello there"), Topic::Menu);
        assert!(reply.contains("His 4 major projects (Deepfake Detection, TrackBot"));
        assert!(reply.contains("How to collaborate or get in touch"));
    }
}
