//! Shared fixtures for handler tests: an in-memory state bundle and seed
//! helpers producing valid request bodies.

use std::sync::Arc;

use actix_web::web;
use serde_json::{Value, json};

use crate::domain::academic_department_service::AcademicDepartmentService;
use crate::domain::academic_faculty_service::AcademicFacultyService;
use crate::domain::faculty_member_service::FacultyMemberService;
use crate::domain::semester_service::SemesterService;
use crate::domain::student_service::StudentService;
use crate::domain::user_onboarding::{DefaultPasswords, UserOnboardingService};
use crate::inbound::http::state::HttpState;
use crate::outbound::persistence::MemoryStore;

/// Build a handler state over a fresh in-memory store.
pub fn memory_state() -> web::Data<HttpState> {
    memory_state_with_store().0
}

/// Build a handler state, keeping a handle on the store for assertions
/// against records the HTTP surface does not expose.
pub fn memory_state_with_store() -> (web::Data<HttpState>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let passwords = DefaultPasswords {
        student: "student-pass".to_owned(),
        faculty: "faculty-pass".to_owned(),
        admin: "admin-pass".to_owned(),
    };
    let state = web::Data::new(HttpState {
        semesters: SemesterService::new(store.clone()),
        academic_faculties: AcademicFacultyService::new(store.clone()),
        academic_departments: AcademicDepartmentService::new(store.clone(), store.clone()),
        students: StudentService::new(store.clone(), store.clone()),
        faculty_members: FacultyMemberService::new(store.clone(), store.clone()),
        onboarding: UserOnboardingService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            passwords,
        ),
    });
    (state, store)
}

/// A valid create-semester body.
pub fn semester_body(year: i32) -> Value {
    json!({
        "title": "Autumn",
        "year": year,
        "code": "01",
        "startMonth": "January",
        "endMonth": "April",
    })
}

/// A valid onboarding student body, keyed to seeded academic references.
pub fn student_body(semester: &str, department: &str, faculty: &str, email: &str) -> Value {
    json!({
        "password": "changeme",
        "student": {
            "name": {"firstName": "Ada", "lastName": "Lovelace"},
            "dateOfBirth": "1990-12-10",
            "gender": "Female",
            "bloodGroup": "A+",
            "email": email,
            "contactNo": format!("consult-{email}"),
            "emergencyContactNo": "0172000000",
            "presentAddress": "12 Analytical Lane",
            "permanentAddress": "12 Analytical Lane",
            "guardian": {
                "fatherName": "George",
                "fatherOccupation": "Clerk",
                "fatherContactNo": "0171000001",
                "motherName": "Anne",
                "motherOccupation": "Writer",
                "motherContactNo": "0171000002",
                "address": "12 Analytical Lane",
            },
            "localGuardian": {
                "name": "Charles",
                "occupation": "Engineer",
                "contactNo": "0171000003",
                "address": "3 Difference Row",
            },
            "academicSemester": semester,
            "academicDepartment": department,
            "academicFaculty": faculty,
        }
    })
}

/// A valid onboarding faculty body.
pub fn faculty_body(department: &str, faculty: &str, email: &str) -> Value {
    json!({
        "faculty": {
            "name": {"firstName": "Grace", "lastName": "Hopper"},
            "dateOfBirth": "1906-12-09",
            "gender": "Female",
            "email": email,
            "contactNo": format!("line-{email}"),
            "emergencyContactNo": "0172000001",
            "presentAddress": "1 Compiler Court",
            "permanentAddress": "1 Compiler Court",
            "designation": "Lecturer",
            "academicDepartment": department,
            "academicFaculty": faculty,
        }
    })
}
