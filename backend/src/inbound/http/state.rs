//! Shared HTTP adapter state.
//!
//! Handlers receive this bundle via `actix_web::web::Data` so they depend on
//! domain services only and stay testable against an in-memory store.

use crate::domain::academic_department_service::AcademicDepartmentService;
use crate::domain::academic_faculty_service::AcademicFacultyService;
use crate::domain::faculty_member_service::FacultyMemberService;
use crate::domain::semester_service::SemesterService;
use crate::domain::student_service::StudentService;
use crate::domain::user_onboarding::UserOnboardingService;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub semesters: SemesterService,
    pub academic_faculties: AcademicFacultyService,
    pub academic_departments: AcademicDepartmentService,
    pub students: StudentService,
    pub faculty_members: FacultyMemberService,
    pub onboarding: UserOnboardingService,
}
