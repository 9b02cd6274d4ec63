use std::fmt;

use pql_core::DocType;

/// Entity a group of UI filters talks about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Donor,
    Gene,
    Mutation,
    Project,
    File,
}

impl Entity {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "donor" => Self::Donor,
            "gene" => Self::Gene,
            "mutation" => Self::Mutation,
            "project" => Self::Project,
            "file" => Self::File,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Donor => "donor",
            Self::Gene => "gene",
            Self::Mutation => "mutation",
            Self::Project => "project",
            Self::File => "file",
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Path an entity's filters are nested under when run against `target`.
///
/// `Some("")` means no nesting. `None` means the entity can't be filtered on
/// for that type.
pub fn nesting_path(entity: Entity, target: DocType) -> Option<&'static str> {
    Some(match (entity, target) {
        (Entity::Donor, DocType::DonorCentric) => "",
        (Entity::Donor, DocType::GeneCentric) => "donor",
        (Entity::Donor, DocType::MutationCentric) => "ssm_occurrence",

        (Entity::Gene, DocType::DonorCentric) => "gene",
        (Entity::Gene, DocType::GeneCentric) => "",
        (Entity::Gene, DocType::MutationCentric) => "transcript",

        (Entity::Mutation, DocType::DonorCentric) => "gene.ssm",
        (Entity::Mutation, DocType::GeneCentric) => "donor.ssm",
        (Entity::Mutation, DocType::MutationCentric) => "",

        (Entity::Project, DocType::Project) | (Entity::File, DocType::File) => "",

        _ => return None,
    })
}
