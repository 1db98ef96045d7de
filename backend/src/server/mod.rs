//! Server construction and route wiring.

mod config;

pub use config::AppConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use backend::RequestLog;
use backend::domain::academic_department_service::AcademicDepartmentService;
use backend::domain::academic_faculty_service::AcademicFacultyService;
use backend::domain::faculty_member_service::FacultyMemberService;
use backend::domain::semester_service::SemesterService;
use backend::domain::student_service::StudentService;
use backend::domain::user_onboarding::{DefaultPasswords, UserOnboardingService};
use backend::inbound::http::academic_departments::{
    create_academic_department, delete_academic_department, get_academic_department,
    list_academic_departments, update_academic_department,
};
use backend::inbound::http::academic_faculties::{
    create_academic_faculty, delete_academic_faculty, get_academic_faculty,
    list_academic_faculties, update_academic_faculty,
};
use backend::inbound::http::error;
use backend::inbound::http::faculty_members::{
    delete_faculty_member, get_faculty_member, list_faculty_members, update_faculty_member,
};
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::semesters::{
    create_semester, delete_semester, get_semester, list_semesters, update_semester,
};
use backend::inbound::http::state::HttpState;
use backend::inbound::http::students::{
    delete_student, get_student, list_students, update_student,
};
use backend::inbound::http::users::{create_faculty, create_student};
use backend::outbound::persistence::MemoryStore;

/// Wire every domain service over one shared in-memory store.
#[must_use]
pub fn build_state(passwords: DefaultPasswords) -> HttpState {
    let store = Arc::new(MemoryStore::default());
    HttpState {
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
            store,
            passwords,
        ),
    }
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api/v1")
        .app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
        .service(create_semester)
        .service(list_semesters)
        .service(get_semester)
        .service(update_semester)
        .service(delete_semester)
        .service(create_academic_faculty)
        .service(list_academic_faculties)
        .service(get_academic_faculty)
        .service(update_academic_faculty)
        .service(delete_academic_faculty)
        .service(create_academic_department)
        .service(list_academic_departments)
        .service(get_academic_department)
        .service(update_academic_department)
        .service(delete_academic_department)
        .service(list_students)
        .service(get_student)
        .service(update_student)
        .service(delete_student)
        .service(list_faculty_members)
        .service(get_faculty_member)
        .service(update_faculty_member)
        .service(delete_faculty_member)
        .service(create_student)
        .service(create_faculty);

    App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(RequestLog)
        .service(api)
        .service(ready)
        .service(live)
        .default_service(web::route().to(error::unmatched_route))
}

/// Construct the HTTP server bound to the configured address.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    config: &AppConfig,
    health_state: web::Data<HealthState>,
) -> std::io::Result<Server> {
    let http_state = web::Data::new(build_state(config.default_passwords()));
    let server = HttpServer::new(move || build_app(health_state.clone(), http_state.clone()))
        .bind((config.ip.as_str(), config.port))?
        .run();
    Ok(server)
}
