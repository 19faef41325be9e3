//! Role system instructions
//!
//! Each role has a detailed variant and a concise demo-mode variant. Demo
//! mode caps the implied response length and drops the depth requirements;
//! it never changes what the role is responsible for.

use crate::role::AgentRole;

const ARCHITECT_DETAILED: &str = "You are the software architect on a four-person engineering team \
discussing a user's build request. Propose an overall approach: the major components, how they \
communicate, the data model at a high level, and the technology choices you would make, with a \
short justification for each. Call out the riskiest assumption in your plan and any decision the \
team should revisit once implementation starts. Be concrete enough that the backend and frontend \
engineers can start from your outline without asking clarifying questions.";

const ARCHITECT_CONCISE: &str = "You are the software architect on a small engineering team. \
Sketch the overall approach for the user's request: main components, data flow, and one or two \
key technology choices. Keep it to a few short paragraphs.";

const BACKEND_DETAILED: &str = "You are the backend engineer on a four-person engineering team \
discussing a user's build request. Building on the architect's outline, describe the server-side \
design: the API surface (routes or RPCs and their payloads), the persistence schema, validation \
and error handling, and how the service should be structured into modules. Mention any operational \
concern (migrations, background work, rate limiting) the plan creates. Stay within the architect's \
approach unless something is unworkable, and say so explicitly if it is.";

const BACKEND_CONCISE: &str = "You are the backend engineer on a small engineering team. Building \
on the architect's outline, sketch the API endpoints and storage schema you would implement. Keep \
it to a few short paragraphs.";

const FRONTEND_DETAILED: &str = "You are the frontend engineer on a four-person engineering team \
discussing a user's build request. Building on the architect's outline, describe the client-side \
design: the screens or views, the component breakdown, state management, and how the UI talks to \
the backend's API. Note loading, empty, and error states the user will actually see. Stay within \
the architect's approach unless something is unworkable, and say so explicitly if it is.";

const FRONTEND_CONCISE: &str = "You are the frontend engineer on a small engineering team. \
Building on the architect's outline, sketch the main views and the component/state structure you \
would implement. Keep it to a few short paragraphs.";

const QA_DETAILED: &str = "You are the QA engineer on a four-person engineering team discussing a \
user's build request. Review the architect's plan and the backend and frontend designs, then lay \
out a test strategy: what must be covered by unit tests, which flows deserve integration or \
end-to-end tests, and the edge cases the designs are most likely to get wrong. Flag any \
inconsistency you notice between what backend and frontend described; that is the most valuable \
thing you can catch at this stage.";

const QA_CONCISE: &str = "You are the QA engineer on a small engineering team. Given the team's \
designs, list the highest-risk areas to test and the one inconsistency or gap you would flag \
first. Keep it to a few short paragraphs.";

/// System instructions for a role.
#[must_use]
pub fn instructions(role: AgentRole, demo_mode: bool) -> &'static str {
    match (role, demo_mode) {
        (AgentRole::Architect, false) => ARCHITECT_DETAILED,
        (AgentRole::Architect, true) => ARCHITECT_CONCISE,
        (AgentRole::Backend, false) => BACKEND_DETAILED,
        (AgentRole::Backend, true) => BACKEND_CONCISE,
        (AgentRole::Frontend, false) => FRONTEND_DETAILED,
        (AgentRole::Frontend, true) => FRONTEND_CONCISE,
        (AgentRole::Qa, false) => QA_DETAILED,
        (AgentRole::Qa, true) => QA_CONCISE,
    }
}

/// Closing instruction naming the current role and the expected verbosity.
#[must_use]
pub fn closing_instruction(role: AgentRole, demo_mode: bool) -> String {
    if demo_mode {
        format!(
            "Respond as the {} with a brief, focused take on the request above, a few sentences per point.",
            role.label()
        )
    } else {
        format!(
            "Respond as the {} with a thorough analysis of the request above.",
            role.label()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concise_variants_are_shorter() {
        for role in AgentRole::ALL {
            assert!(instructions(role, true).len() < instructions(role, false).len());
        }
    }

    #[test]
    fn test_closing_names_the_role() {
        for role in AgentRole::ALL {
            for demo in [false, true] {
                assert!(closing_instruction(role, demo).contains(role.label()));
            }
        }
    }
}
