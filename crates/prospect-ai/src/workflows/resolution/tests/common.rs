use crate::workflows::resolution::domain::{
    CandidateEntity, CompanyContext, CompanyId, EntityId, EntityMention, MatchOptions,
};

pub(super) fn company() -> CompanyContext {
    CompanyContext {
        company_id: CompanyId("co-midwest-401".to_string()),
        canonical_name: "Midwest Benefits Partners".to_string(),
    }
}

pub(super) fn other_company_id() -> CompanyId {
    CompanyId("co-lakeside-77".to_string())
}

pub(super) fn candidate(
    suffix: &str,
    name: &str,
    company_id: CompanyId,
    title: Option<&str>,
) -> CandidateEntity {
    CandidateEntity {
        entity_id: EntityId(format!("ent-{suffix}")),
        display_name: name.to_string(),
        company_id,
        title: title.map(str::to_string),
    }
}

pub(super) fn mention(name: &str) -> EntityMention {
    EntityMention {
        name: name.to_string(),
        employer: None,
        identifier: None,
    }
}

pub(super) fn company_scoped_options() -> MatchOptions {
    MatchOptions {
        require_company_match: true,
        title_hint: None,
    }
}
