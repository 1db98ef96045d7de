//! User onboarding endpoints.
//!
//! ```text
//! POST /api/v1/users/create-student
//! POST /api/v1/users/create-faculty
//! ```
//!
//! The request bodies nest the profile under `student`/`faculty` beside an
//! optional `password`; validators flatten every violation into one schema
//! error before the onboarding coordinator runs. The shared profile payloads
//! here are reused by the student and faculty-member update endpoints.

use actix_web::{HttpResponse, post, web};
use serde::Deserialize;

use crate::domain::ApiError;
use crate::domain::faculty_member::FacultyMemberDraft;
use crate::domain::profile::{BloodGroup, Gender, Guardian, LocalGuardian, Name};
use crate::domain::student::StudentDraft;
use crate::inbound::http::ApiResult;
use crate::inbound::http::response;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldErrors, optional_enum, optional_string, required_email, required_enum,
    required_reference, required_string,
};

/// Personal name subdocument payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamePayload {
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
}

impl NamePayload {
    pub(crate) fn validate(self, errors: &mut FieldErrors) -> Option<Name> {
        let first_name =
            required_string(errors, "firstName", self.first_name, "First name is required");
        let last_name =
            required_string(errors, "lastName", self.last_name, "Last name is required");
        let middle_name = optional_string(self.middle_name);
        match (first_name, last_name) {
            (Some(first_name), Some(last_name)) => Some(Name {
                first_name,
                middle_name,
                last_name,
            }),
            _ => None,
        }
    }
}

/// Guardian subdocument payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuardianPayload {
    pub father_name: Option<String>,
    pub father_occupation: Option<String>,
    pub father_contact_no: Option<String>,
    pub mother_name: Option<String>,
    pub mother_occupation: Option<String>,
    pub mother_contact_no: Option<String>,
    pub address: Option<String>,
}

impl GuardianPayload {
    pub(crate) fn validate(self, errors: &mut FieldErrors) -> Option<Guardian> {
        let father_name =
            required_string(errors, "fatherName", self.father_name, "Father name is required");
        let father_occupation = required_string(
            errors,
            "fatherOccupation",
            self.father_occupation,
            "Father occupation is required",
        );
        let father_contact_no = required_string(
            errors,
            "fatherContactNo",
            self.father_contact_no,
            "Father contact number is required",
        );
        let mother_name =
            required_string(errors, "motherName", self.mother_name, "Mother name is required");
        let mother_occupation = required_string(
            errors,
            "motherOccupation",
            self.mother_occupation,
            "Mother occupation is required",
        );
        let mother_contact_no = required_string(
            errors,
            "motherContactNo",
            self.mother_contact_no,
            "Mother contact number is required",
        );
        let address =
            required_string(errors, "address", self.address, "Guardian address is required");

        match (
            father_name,
            father_occupation,
            father_contact_no,
            mother_name,
            mother_occupation,
            mother_contact_no,
            address,
        ) {
            (
                Some(father_name),
                Some(father_occupation),
                Some(father_contact_no),
                Some(mother_name),
                Some(mother_occupation),
                Some(mother_contact_no),
                Some(address),
            ) => Some(Guardian {
                father_name,
                father_occupation,
                father_contact_no,
                mother_name,
                mother_occupation,
                mother_contact_no,
                address,
            }),
            _ => None,
        }
    }
}

/// Local guardian subdocument payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalGuardianPayload {
    pub name: Option<String>,
    pub occupation: Option<String>,
    pub contact_no: Option<String>,
    pub address: Option<String>,
}

impl LocalGuardianPayload {
    pub(crate) fn validate(self, errors: &mut FieldErrors) -> Option<LocalGuardian> {
        let name = required_string(errors, "name", self.name, "Local guardian name is required");
        let occupation = required_string(
            errors,
            "occupation",
            self.occupation,
            "Local guardian occupation is required",
        );
        let contact_no = required_string(
            errors,
            "contactNo",
            self.contact_no,
            "Local guardian contact number is required",
        );
        let address = required_string(
            errors,
            "address",
            self.address,
            "Local guardian address is required",
        );
        match (name, occupation, contact_no, address) {
            (Some(name), Some(occupation), Some(contact_no), Some(address)) => {
                Some(LocalGuardian {
                    name,
                    occupation,
                    contact_no,
                    address,
                })
            }
            _ => None,
        }
    }
}

/// Student profile payload nested in the onboarding body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentPayload {
    pub name: Option<NamePayload>,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub blood_group: Option<String>,
    pub email: Option<String>,
    pub contact_no: Option<String>,
    pub emergency_contact_no: Option<String>,
    pub present_address: Option<String>,
    pub permanent_address: Option<String>,
    pub guardian: Option<GuardianPayload>,
    pub local_guardian: Option<LocalGuardianPayload>,
    pub academic_semester: Option<String>,
    pub academic_department: Option<String>,
    pub academic_faculty: Option<String>,
    pub profile_image: Option<String>,
}

/// Body of `POST /users/create-student`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentRequest {
    pub password: Option<String>,
    pub student: Option<StudentPayload>,
}

fn validate_student(payload: Option<StudentPayload>) -> Result<StudentDraft, ApiError> {
    let Some(p) = payload else {
        return Err(ApiError::input_schema(
            "student",
            "Student information is required",
        ));
    };

    let mut errors = FieldErrors::new();
    let name = match p.name {
        Some(name) => name.validate(&mut errors),
        None => {
            errors.push("name", "Name is required");
            None
        }
    };
    let date_of_birth = required_string(
        &mut errors,
        "dateOfBirth",
        p.date_of_birth,
        "Date of birth is required",
    );
    let gender = required_enum(
        &mut errors,
        "gender",
        p.gender,
        Gender::parse,
        "Gender is required",
        "Invalid gender",
    );
    let blood_group = optional_enum(
        &mut errors,
        "bloodGroup",
        p.blood_group,
        BloodGroup::parse,
        "Invalid blood group",
    );
    let email = required_email(&mut errors, "email", p.email, "Email is required");
    let contact_no = required_string(
        &mut errors,
        "contactNo",
        p.contact_no,
        "Contact number is required",
    );
    let emergency_contact_no = required_string(
        &mut errors,
        "emergencyContactNo",
        p.emergency_contact_no,
        "Emergency contact number is required",
    );
    let present_address = required_string(
        &mut errors,
        "presentAddress",
        p.present_address,
        "Present address is required",
    );
    let permanent_address = required_string(
        &mut errors,
        "permanentAddress",
        p.permanent_address,
        "Permanent address is required",
    );
    let guardian = match p.guardian {
        Some(guardian) => guardian.validate(&mut errors),
        None => {
            errors.push("guardian", "Guardian information is required");
            None
        }
    };
    let local_guardian = match p.local_guardian {
        Some(local) => local.validate(&mut errors),
        None => {
            errors.push("localGuardian", "Local guardian information is required");
            None
        }
    };
    let academic_semester = required_reference(
        &mut errors,
        "academicSemester",
        p.academic_semester,
        "Academic semester is required",
        "Invalid academic semester",
    );
    let academic_department = required_reference(
        &mut errors,
        "academicDepartment",
        p.academic_department,
        "Academic department is required",
        "Invalid academic department",
    );
    let academic_faculty = required_reference(
        &mut errors,
        "academicFaculty",
        p.academic_faculty,
        "Academic faculty is required",
        "Invalid academic faculty",
    );
    let profile_image = optional_string(p.profile_image);
    errors.finish()?;

    Ok(StudentDraft {
        name: name.ok_or(ApiError::Unknown)?,
        gender: gender.ok_or(ApiError::Unknown)?,
        date_of_birth: date_of_birth.ok_or(ApiError::Unknown)?,
        email: email.ok_or(ApiError::Unknown)?,
        contact_no: contact_no.ok_or(ApiError::Unknown)?,
        emergency_contact_no: emergency_contact_no.ok_or(ApiError::Unknown)?,
        blood_group,
        present_address: present_address.ok_or(ApiError::Unknown)?,
        permanent_address: permanent_address.ok_or(ApiError::Unknown)?,
        guardian: guardian.ok_or(ApiError::Unknown)?,
        local_guardian: local_guardian.ok_or(ApiError::Unknown)?,
        profile_image,
        academic_semester: academic_semester.ok_or(ApiError::Unknown)?,
        academic_department: academic_department.ok_or(ApiError::Unknown)?,
        academic_faculty: academic_faculty.ok_or(ApiError::Unknown)?,
    })
}

/// Faculty profile payload nested in the onboarding body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacultyPayload {
    pub name: Option<NamePayload>,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub blood_group: Option<String>,
    pub email: Option<String>,
    pub contact_no: Option<String>,
    pub emergency_contact_no: Option<String>,
    pub present_address: Option<String>,
    pub permanent_address: Option<String>,
    pub designation: Option<String>,
    pub academic_department: Option<String>,
    pub academic_faculty: Option<String>,
    pub profile_image: Option<String>,
}

/// Body of `POST /users/create-faculty`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFacultyRequest {
    pub password: Option<String>,
    pub faculty: Option<FacultyPayload>,
}

fn validate_faculty(payload: Option<FacultyPayload>) -> Result<FacultyMemberDraft, ApiError> {
    let Some(p) = payload else {
        return Err(ApiError::input_schema(
            "faculty",
            "Faculty information is required",
        ));
    };

    let mut errors = FieldErrors::new();
    let name = match p.name {
        Some(name) => name.validate(&mut errors),
        None => {
            errors.push("name", "Name is required");
            None
        }
    };
    let date_of_birth = required_string(
        &mut errors,
        "dateOfBirth",
        p.date_of_birth,
        "Date of birth is required",
    );
    let gender = required_enum(
        &mut errors,
        "gender",
        p.gender,
        Gender::parse,
        "Gender is required",
        "Invalid gender",
    );
    let blood_group = optional_enum(
        &mut errors,
        "bloodGroup",
        p.blood_group,
        BloodGroup::parse,
        "Invalid blood group",
    );
    let email = required_email(&mut errors, "email", p.email, "Email is required");
    let contact_no = required_string(
        &mut errors,
        "contactNo",
        p.contact_no,
        "Contact number is required",
    );
    let emergency_contact_no = required_string(
        &mut errors,
        "emergencyContactNo",
        p.emergency_contact_no,
        "Emergency contact number is required",
    );
    let present_address = required_string(
        &mut errors,
        "presentAddress",
        p.present_address,
        "Present address is required",
    );
    let permanent_address = required_string(
        &mut errors,
        "permanentAddress",
        p.permanent_address,
        "Permanent address is required",
    );
    let designation = required_string(
        &mut errors,
        "designation",
        p.designation,
        "Designation is required",
    );
    let academic_department = required_reference(
        &mut errors,
        "academicDepartment",
        p.academic_department,
        "Academic department is required",
        "Invalid academic department",
    );
    let academic_faculty = required_reference(
        &mut errors,
        "academicFaculty",
        p.academic_faculty,
        "Academic faculty is required",
        "Invalid academic faculty",
    );
    let profile_image = optional_string(p.profile_image);
    errors.finish()?;

    Ok(FacultyMemberDraft {
        name: name.ok_or(ApiError::Unknown)?,
        gender: gender.ok_or(ApiError::Unknown)?,
        date_of_birth: date_of_birth.ok_or(ApiError::Unknown)?,
        email: email.ok_or(ApiError::Unknown)?,
        contact_no: contact_no.ok_or(ApiError::Unknown)?,
        emergency_contact_no: emergency_contact_no.ok_or(ApiError::Unknown)?,
        blood_group,
        present_address: present_address.ok_or(ApiError::Unknown)?,
        permanent_address: permanent_address.ok_or(ApiError::Unknown)?,
        designation: designation.ok_or(ApiError::Unknown)?,
        profile_image,
        academic_department: academic_department.ok_or(ApiError::Unknown)?,
        academic_faculty: academic_faculty.ok_or(ApiError::Unknown)?,
    })
}

#[post("/users/create-student")]
pub async fn create_student(
    state: web::Data<HttpState>,
    payload: web::Json<CreateStudentRequest>,
) -> ApiResult<HttpResponse> {
    let CreateStudentRequest { password, student } = payload.into_inner();
    let draft = validate_student(student)?;
    match state.onboarding.create_student(draft, password).await? {
        Some(data) => Ok(response::created("Student created successfully", data)),
        None => Ok(response::created_empty("Failed to create student")),
    }
}

#[post("/users/create-faculty")]
pub async fn create_faculty(
    state: web::Data<HttpState>,
    payload: web::Json<CreateFacultyRequest>,
) -> ApiResult<HttpResponse> {
    let CreateFacultyRequest { password, faculty } = payload.into_inner();
    let draft = validate_faculty(faculty)?;
    match state.onboarding.create_faculty(draft, password).await? {
        Some(data) => Ok(response::created("Faculty created successfully", data)),
        None => Ok(response::created_empty("Failed to create faculty")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use serde_json::{Value, json};
    use uuid::Uuid;

    use crate::inbound::http::error::ErrorEnvelope;
    use crate::inbound::http::test_utils::{faculty_body, memory_state, student_body};

    struct Seeded {
        state: web::Data<HttpState>,
        semester: String,
        department: String,
        faculty: String,
    }

    async fn seeded_state() -> Seeded {
        let state = memory_state();
        let semester = state
            .semesters
            .create(crate::domain::semester::NewSemester {
                title: crate::domain::semester::SemesterTitle::Autumn,
                year: 2025,
                code: crate::domain::semester::SemesterCode::C01,
                start_month: crate::domain::semester::Month::January,
                end_month: crate::domain::semester::Month::April,
            })
            .await
            .expect("semester seeds");
        let faculty = state
            .academic_faculties
            .create("Faculty of Science".to_owned())
            .await
            .expect("faculty seeds");
        let department = state
            .academic_departments
            .create("Physics".to_owned(), faculty.id)
            .await
            .expect("department seeds");
        Seeded {
            state,
            semester: semester.id.to_string(),
            department: department.id.to_string(),
            faculty: faculty.id.to_string(),
        }
    }

    fn test_app(
        state: web::Data<HttpState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(state)
            .service(create_student)
            .service(create_faculty)
    }

    #[actix_rt::test]
    async fn onboarding_issues_semester_derived_student_ids() {
        let seeded = seeded_state().await;
        let app = actix_test::init_service(test_app(seeded.state.clone())).await;

        for (index, email) in ["ada@example.com", "mary@example.com"].iter().enumerate() {
            let request = actix_test::TestRequest::post()
                .uri("/users/create-student")
                .set_json(student_body(
                    &seeded.semester,
                    &seeded.department,
                    &seeded.faculty,
                    email,
                ))
                .to_request();
            let body: Value = actix_test::call_and_read_body_json(&app, request).await;
            assert_eq!(body["statusCode"], json!(201));
            assert_eq!(body["message"], json!("Student created successfully"));
            let expected_id = format!("2501{:05}", index + 1);
            assert_eq!(body["data"]["id"], json!(expected_id));
            assert_eq!(body["data"]["student"]["id"], json!(expected_id));
            assert_eq!(
                body["data"]["student"]["academicSemester"]["year"],
                json!(2025)
            );
            assert!(body["data"].get("passwordHash").is_none());
        }
    }

    #[actix_rt::test]
    async fn onboarding_issues_prefixed_faculty_ids() {
        let seeded = seeded_state().await;
        let app = actix_test::init_service(test_app(seeded.state.clone())).await;

        let request = actix_test::TestRequest::post()
            .uri("/users/create-faculty")
            .set_json(faculty_body(
                &seeded.department,
                &seeded.faculty,
                "grace@example.com",
            ))
            .to_request();
        let body: Value = actix_test::call_and_read_body_json(&app, request).await;
        assert_eq!(body["message"], json!("Faculty created successfully"));
        assert_eq!(body["data"]["id"], json!("F-00001"));
        assert_eq!(body["data"]["faculty"]["designation"], json!("Lecturer"));
    }

    #[actix_rt::test]
    async fn unknown_semester_fails_before_any_write() {
        let seeded = seeded_state().await;
        let app = actix_test::init_service(test_app(seeded.state.clone())).await;

        let request = actix_test::TestRequest::post()
            .uri("/users/create-student")
            .set_json(student_body(
                &Uuid::new_v4().to_string(),
                &seeded.department,
                &seeded.faculty,
                "ada@example.com",
            ))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let envelope: ErrorEnvelope = actix_test::read_body_json(response).await;
        assert_eq!(envelope.message, "Academic semester not found");

        let (students, _) = seeded
            .state
            .students
            .list(Default::default(), &pagination::PaginationOptions::default())
            .await
            .expect("listing succeeds");
        assert!(students.is_empty());
    }

    #[actix_rt::test]
    async fn duplicate_email_is_a_conflict() {
        let seeded = seeded_state().await;
        let app = actix_test::init_service(test_app(seeded.state.clone())).await;

        for expected in [StatusCode::CREATED, StatusCode::CONFLICT] {
            let mut body = student_body(
                &seeded.semester,
                &seeded.department,
                &seeded.faculty,
                "ada@example.com",
            );
            // Vary the contact number so only the email collides.
            body["student"]["contactNo"] = json!(format!("ct-{expected}"));
            let request = actix_test::TestRequest::post()
                .uri("/users/create-student")
                .set_json(body)
                .to_request();
            let response = actix_test::call_service(&app, request).await;
            assert_eq!(response.status(), expected);
        }
    }

    #[actix_rt::test]
    async fn schema_violations_list_every_missing_field() {
        let seeded = seeded_state().await;
        let app = actix_test::init_service(test_app(seeded.state)).await;

        let request = actix_test::TestRequest::post()
            .uri("/users/create-student")
            .set_json(json!({"student": {"name": {"firstName": "Ada"}}}))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let envelope: ErrorEnvelope = actix_test::read_body_json(response).await;
        let messages: Vec<&str> = envelope
            .error_messages
            .iter()
            .map(|m| m.message.as_str())
            .collect();
        assert!(messages.contains(&"Last name is required"));
        assert!(messages.contains(&"Email is required"));
        assert!(messages.contains(&"Guardian information is required"));
        assert!(messages.contains(&"Academic semester is required"));
    }

    #[actix_rt::test]
    async fn missing_student_object_is_rejected() {
        let seeded = seeded_state().await;
        let app = actix_test::init_service(test_app(seeded.state)).await;

        let request = actix_test::TestRequest::post()
            .uri("/users/create-student")
            .set_json(json!({"password": "changeme"}))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let envelope: ErrorEnvelope = actix_test::read_body_json(response).await;
        assert_eq!(envelope.error_messages[0].path, "student");
    }
}
