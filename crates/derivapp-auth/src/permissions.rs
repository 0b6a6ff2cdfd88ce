use serde::{Deserialize, Serialize};

/// Application role carried in the `custom:role` token claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum Role {
    #[serde(rename = "admin")]
    Admin,
    #[serde(rename = "psicologo")]
    Psychologist,
    #[serde(rename = "docente")]
    Teacher,
}

impl Role {
    /// Classify a raw role string. Unknown values get the
    /// least-privileged role.
    pub fn classify(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "admin" => Role::Admin,
            "psicologo" => Role::Psychologist,
            "docente" => Role::Teacher,
            _ => Role::Teacher,
        }
    }
}

impl From<String> for Role {
    fn from(raw: String) -> Self {
        Role::classify(&raw)
    }
}

/// Actions the REST surface gates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    ReadStudents,
    ManageStudents,
    ReadReferrals,
    CreateReferrals,
    ManageReferrals,
    ManageFollowUps,
    ManageInterventions,
    ReadAppointments,
    CreateAppointments,
    ManageAppointments,
    ReadForms,
    ManageForms,
    ReadAlerts,
    ManageAlerts,
    ReadActivity,
    DeleteRecords,
}

impl Role {
    pub fn allows(self, permission: Permission) -> bool {
        use Permission::*;
        match self {
            Role::Admin => true,
            // Psychologists run the case work; deletions stay with admins.
            Role::Psychologist => !matches!(permission, DeleteRecords),
            Role::Teacher => matches!(
                permission,
                ReadStudents
                    | ReadReferrals
                    | CreateReferrals
                    | ReadAppointments
                    | CreateAppointments
                    | ReadForms
            ),
        }
    }
}
