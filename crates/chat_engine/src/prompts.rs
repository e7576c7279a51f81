//! System instruction for the remote model.
//!
//! The instruction embeds the whole professional profile plus a strict
//! topic policy, so the remote answer never depends on earlier turns.

use shared::profile::Profile;
use shared::project::Project;

use crate::fallback::FallbackResponder;

/// Build the system instruction for `profile`.
pub fn build_system_prompt(profile: &Profile) -> String {
    let first = profile.first_name();
    let projects = profile
        .projects
        .iter()
        .enumerate()
        .map(|(i, p)| project_block(i + 1, p))
        .collect::<Vec<_>>()
        .join("\n\n");
    let redirect = FallbackResponder::new(profile.clone()).redirect_text();

    format!(
        r#"You are a professional AI assistant for {name}'s portfolio website.

STRICT RULES:
1. ONLY answer questions about his professional work, projects, skills, and technical expertise
2. NEVER discuss personal life, relationships, family, or private matters
3. If asked personal questions, politely redirect to professional topics
4. Base answers on this professional information:

PROFESSIONAL PROFILE:
- Name: {name}
- Role: {title} at {institution}
- Expertise: {expertise}

PROJECTS:
{projects}

SKILLS:
{skills}

CONTACT:
- GitHub: {github}
- LinkedIn: {linkedin}

Answer professionally, technically, and concisely. If the question about {first} is personal, respond: "{redirect}""#,
        name = profile.name,
        title = profile.title,
        institution = profile.institution,
        expertise = profile.expertise.join(", "),
        projects = projects,
        skills = profile.skills.join(", "),
        github = profile.socials.github,
        linkedin = profile.socials.linkedin,
        first = first,
        redirect = redirect,
    )
}

fn project_block(n: usize, p: &Project) -> String {
    let mut flags = vec![p.completion_date.clone(), p.status.label().to_string()];
    if p.deployed {
        flags.push("Deployed".into());
    }
    format!(
        "{n}. {title} ({flags})\n   - {desc}\n   - Tech: {tags}",
        title = p.title,
        flags = flags.join(", "),
        desc = p.short_description,
        tags = p.tags.join(", "),
    )
}
