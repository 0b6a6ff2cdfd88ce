use derivapp_auth::permissions::{Permission, Role};

#[test]
fn admin_is_unrestricted() {
    assert!(Role::Admin.allows(Permission::DeleteRecords));
    assert!(Role::Admin.allows(Permission::ManageAlerts));
    assert!(Role::Admin.allows(Permission::ReadActivity));
}

#[test]
fn psychologist_cannot_delete() {
    assert!(Role::Psychologist.allows(Permission::ManageStudents));
    assert!(Role::Psychologist.allows(Permission::ManageFollowUps));
    assert!(Role::Psychologist.allows(Permission::ManageAlerts));
    assert!(Role::Psychologist.allows(Permission::ReadActivity));
    assert!(!Role::Psychologist.allows(Permission::DeleteRecords));
}

#[test]
fn teacher_is_read_and_refer_only() {
    assert!(Role::Teacher.allows(Permission::ReadStudents));
    assert!(Role::Teacher.allows(Permission::CreateReferrals));
    assert!(Role::Teacher.allows(Permission::CreateAppointments));
    assert!(!Role::Teacher.allows(Permission::ManageStudents));
    assert!(!Role::Teacher.allows(Permission::ManageFollowUps));
    assert!(!Role::Teacher.allows(Permission::ReadAlerts));
    assert!(!Role::Teacher.allows(Permission::ReadActivity));
    assert!(!Role::Teacher.allows(Permission::DeleteRecords));
}

#[test]
fn unknown_role_claims_get_least_privilege() {
    assert_eq!(Role::classify("direccion"), Role::Teacher);
    assert_eq!(Role::classify(""), Role::Teacher);
    assert_eq!(Role::classify("ADMIN"), Role::Admin);
    assert_eq!(Role::classify("Psicologo"), Role::Psychologist);
}
