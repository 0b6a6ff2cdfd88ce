use derivapp_assist::{draft_form_content, FormDraftRequest};

#[test]
fn empty_sections_produce_a_header_only_document() {
    let request = FormDraftRequest {
        title: "Ficha de entrevista".to_string(),
        student_name: None,
        referral_reason: None,
        sections: vec![],
    };

    let content = draft_form_content(&request);
    assert_eq!(content, "# Ficha de entrevista\n");
}

#[test]
fn context_lines_appear_when_provided() {
    let request = FormDraftRequest {
        title: "Plan de acompañamiento".to_string(),
        student_name: Some("Camila Rojas".to_string()),
        referral_reason: Some("inasistencias reiteradas".to_string()),
        sections: vec![],
    };

    let content = draft_form_content(&request);
    assert!(content.contains("Estudiante: Camila Rojas"));
    assert!(content.contains("Motivo de derivación: inasistencias reiteradas"));
}

#[test]
fn sections_are_numbered_in_order() {
    let request = FormDraftRequest {
        title: "Informe".to_string(),
        student_name: None,
        referral_reason: None,
        sections: vec!["Antecedentes".to_string(), "Acuerdos".to_string()],
    };

    let content = draft_form_content(&request);
    assert!(content.contains("## 1. Antecedentes"));
    assert!(content.contains("## 2. Acuerdos"));
    let first = content.find("## 1.").unwrap();
    let second = content.find("## 2.").unwrap();
    assert!(first < second);
}

#[test]
fn drafting_is_deterministic() {
    let request = FormDraftRequest {
        title: "Informe".to_string(),
        student_name: Some("Diego Soto".to_string()),
        referral_reason: None,
        sections: vec!["Observaciones".to_string()],
    };

    assert_eq!(draft_form_content(&request), draft_form_content(&request));
}
