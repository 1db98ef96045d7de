//! Persistence ports for the hexagonal boundary.
//!
//! The document store is an external collaborator: services depend on these
//! async traits and receive an explicitly constructed adapter at wiring time.

mod academic_department_repository;
mod academic_faculty_repository;
mod faculty_member_repository;
mod semester_repository;
mod store;
mod student_repository;
mod user_repository;

pub use academic_department_repository::AcademicDepartmentRepository;
pub use academic_faculty_repository::AcademicFacultyRepository;
pub use faculty_member_repository::FacultyMemberRepository;
pub use semester_repository::SemesterRepository;
pub use store::{StoreError, StoreTransaction, TransactionalStore};
pub use student_repository::StudentRepository;
pub use user_repository::UserRepository;
