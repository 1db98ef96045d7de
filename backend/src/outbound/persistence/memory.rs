//! In-process document store implementing every persistence port.
//!
//! Documents live in plain vectors behind one `RwLock`. Listing queries
//! project each document to JSON and evaluate the domain predicate against
//! the projection, so search and filter semantics live in the domain and the
//! adapter only supplies iteration, sorting and slicing.
//!
//! Transactions snapshot the whole state under an exclusive writer gate;
//! commit swaps the snapshot in, abort (or drop) discards it. Readers keep
//! seeing the pre-transaction state until commit, so a failed onboarding
//! leaves zero partial writes behind.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use pagination::{Pagination, SortOrder};
use serde::Serialize;
use serde_json::Value;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use crate::domain::academic_department::{
    AcademicDepartment, AcademicDepartmentUpdate, PopulatedDepartment,
};
use crate::domain::academic_faculty::{AcademicFaculty, AcademicFacultyUpdate};
use crate::domain::faculty_member::{FacultyMember, FacultyMemberUpdate, PopulatedFacultyMember};
use crate::domain::ports::{
    AcademicDepartmentRepository, AcademicFacultyRepository, FacultyMemberRepository,
    SemesterRepository, StoreError, StoreTransaction, StudentRepository, TransactionalStore,
    UserRepository,
};
use crate::domain::query::{Predicate, compare_values, lookup_path};
use crate::domain::semester::{AcademicSemester, SemesterTitle, SemesterUpdate};
use crate::domain::student::{PopulatedStudent, Student, StudentUpdate};
use crate::domain::user::{PopulatedUser, Role, User};

/// All collections held by the store.
#[derive(Debug, Clone, Default)]
struct Collections {
    semesters: Vec<AcademicSemester>,
    faculties: Vec<AcademicFaculty>,
    departments: Vec<AcademicDepartment>,
    students: Vec<Student>,
    faculty_members: Vec<FacultyMember>,
    users: Vec<User>,
}

/// In-memory document store.
///
/// Clones share state, so one instance can back every repository port plus
/// the transactional store in the wiring.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<Collections>>,
    write_gate: Arc<Mutex<()>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn read(state: &RwLock<Collections>) -> RwLockReadGuard<'_, Collections> {
    state.read().unwrap_or_else(PoisonError::into_inner)
}

fn write(state: &RwLock<Collections>) -> RwLockWriteGuard<'_, Collections> {
    state.write().unwrap_or_else(PoisonError::into_inner)
}

fn project<T: Serialize>(doc: &T) -> Result<Value, StoreError> {
    serde_json::to_value(doc).map_err(|err| StoreError::query(err.to_string()))
}

/// Filter, sort and slice a collection according to the predicate and
/// pagination tuple. The predicate and the sort field both act on the JSON
/// projection of each document.
fn run_query<T: Serialize + Clone>(
    docs: &[T],
    predicate: &Predicate,
    pagination: &Pagination,
) -> Result<(Vec<T>, u64), StoreError> {
    let mut matched: Vec<(Value, T)> = Vec::new();
    for doc in docs {
        let projected = project(doc)?;
        if predicate.matches(&projected) {
            matched.push((projected, doc.clone()));
        }
    }

    matched.sort_by(|(left, _), (right, _)| {
        let ordering = compare_values(
            lookup_path(left, &pagination.sort_by),
            lookup_path(right, &pagination.sort_by),
        );
        match pagination.sort_order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });

    let total = matched.len() as u64;
    let skip = usize::try_from(pagination.skip).unwrap_or(usize::MAX);
    let limit = usize::try_from(pagination.limit).unwrap_or(usize::MAX);
    let page = matched
        .into_iter()
        .skip(skip)
        .take(limit)
        .map(|(_, doc)| doc)
        .collect();
    Ok((page, total))
}

fn duplicate(collection: &'static str, key: &'static str, value: impl Into<String>) -> StoreError {
    StoreError::DuplicateKey {
        collection,
        key,
        value: value.into(),
    }
}

impl Collections {
    fn faculty_by_id(&self, id: Uuid) -> Option<AcademicFaculty> {
        self.faculties.iter().find(|f| f.id == id).cloned()
    }

    fn semester_by_id(&self, id: Uuid) -> Option<AcademicSemester> {
        self.semesters.iter().find(|s| s.id == id).cloned()
    }

    fn department_by_id(&self, id: Uuid) -> Option<AcademicDepartment> {
        self.departments.iter().find(|d| d.id == id).cloned()
    }

    fn populate_student(&self, student: Student) -> PopulatedStudent {
        let semester = self.semester_by_id(student.academic_semester);
        let department = self.department_by_id(student.academic_department);
        let faculty = self.faculty_by_id(student.academic_faculty);
        PopulatedStudent {
            profile: student.profile,
            academic_semester: semester,
            academic_department: department,
            academic_faculty: faculty,
        }
    }

    fn populate_faculty_member(&self, member: FacultyMember) -> PopulatedFacultyMember {
        let department = self.department_by_id(member.academic_department);
        let faculty = self.faculty_by_id(member.academic_faculty);
        PopulatedFacultyMember {
            profile: member.profile,
            academic_department: department,
            academic_faculty: faculty,
        }
    }

    fn ensure_student_unique(&self, student: &Student) -> Result<(), StoreError> {
        if self.students.iter().any(|s| s.profile.id == student.profile.id) {
            return Err(duplicate("Student", "id", student.profile.id.clone()));
        }
        if self.users.iter().any(|u| u.id == student.profile.id) {
            return Err(duplicate("User", "id", student.profile.id.clone()));
        }
        if self
            .students
            .iter()
            .any(|s| s.profile.email == student.profile.email)
        {
            return Err(duplicate("Student", "email", student.profile.email.clone()));
        }
        if self
            .students
            .iter()
            .any(|s| s.profile.contact_no == student.profile.contact_no)
        {
            return Err(duplicate(
                "Student",
                "contactNo",
                student.profile.contact_no.clone(),
            ));
        }
        Ok(())
    }

    fn ensure_faculty_member_unique(&self, member: &FacultyMember) -> Result<(), StoreError> {
        if self
            .faculty_members
            .iter()
            .any(|m| m.profile.id == member.profile.id)
        {
            return Err(duplicate("Faculty", "id", member.profile.id.clone()));
        }
        if self.users.iter().any(|u| u.id == member.profile.id) {
            return Err(duplicate("User", "id", member.profile.id.clone()));
        }
        if self
            .faculty_members
            .iter()
            .any(|m| m.profile.email == member.profile.email)
        {
            return Err(duplicate("Faculty", "email", member.profile.email.clone()));
        }
        if self
            .faculty_members
            .iter()
            .any(|m| m.profile.contact_no == member.profile.contact_no)
        {
            return Err(duplicate(
                "Faculty",
                "contactNo",
                member.profile.contact_no.clone(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl SemesterRepository for MemoryStore {
    async fn insert(&self, semester: &AcademicSemester) -> Result<(), StoreError> {
        let mut state = write(&self.state);
        if state
            .semesters
            .iter()
            .any(|s| s.title == semester.title && s.year == semester.year)
        {
            return Err(duplicate(
                "Academic semester",
                "title and year",
                format!("{:?} {}", semester.title, semester.year),
            ));
        }
        state.semesters.push(semester.clone());
        Ok(())
    }

    async fn find(
        &self,
        predicate: &Predicate,
        pagination: &Pagination,
    ) -> Result<(Vec<AcademicSemester>, u64), StoreError> {
        let state = read(&self.state);
        run_query(&state.semesters, predicate, pagination)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<AcademicSemester>, StoreError> {
        Ok(read(&self.state).semester_by_id(id))
    }

    async fn find_by_title_year(
        &self,
        title: SemesterTitle,
        year: i32,
    ) -> Result<Option<AcademicSemester>, StoreError> {
        let state = read(&self.state);
        Ok(state
            .semesters
            .iter()
            .find(|s| s.title == title && s.year == year)
            .cloned())
    }

    async fn update(
        &self,
        id: Uuid,
        update: &SemesterUpdate,
    ) -> Result<Option<AcademicSemester>, StoreError> {
        let mut state = write(&self.state);
        let Some(position) = state.semesters.iter().position(|s| s.id == id) else {
            return Ok(None);
        };

        let mut candidate = state.semesters[position].clone();
        candidate.apply_update(update);
        if state
            .semesters
            .iter()
            .any(|s| s.id != id && s.title == candidate.title && s.year == candidate.year)
        {
            return Err(duplicate(
                "Academic semester",
                "title and year",
                format!("{:?} {}", candidate.title, candidate.year),
            ));
        }

        state.semesters[position] = candidate.clone();
        Ok(Some(candidate))
    }

    async fn delete(&self, id: Uuid) -> Result<Option<AcademicSemester>, StoreError> {
        let mut state = write(&self.state);
        let position = state.semesters.iter().position(|s| s.id == id);
        Ok(position.map(|index| state.semesters.remove(index)))
    }
}

#[async_trait]
impl AcademicFacultyRepository for MemoryStore {
    async fn insert(&self, faculty: &AcademicFaculty) -> Result<(), StoreError> {
        let mut state = write(&self.state);
        if state.faculties.iter().any(|f| f.title == faculty.title) {
            return Err(duplicate("Academic faculty", "title", faculty.title.clone()));
        }
        state.faculties.push(faculty.clone());
        Ok(())
    }

    async fn find(
        &self,
        predicate: &Predicate,
        pagination: &Pagination,
    ) -> Result<(Vec<AcademicFaculty>, u64), StoreError> {
        let state = read(&self.state);
        run_query(&state.faculties, predicate, pagination)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<AcademicFaculty>, StoreError> {
        Ok(read(&self.state).faculty_by_id(id))
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<AcademicFaculty>, StoreError> {
        let state = read(&self.state);
        Ok(state.faculties.iter().find(|f| f.title == title).cloned())
    }

    async fn update(
        &self,
        id: Uuid,
        update: &AcademicFacultyUpdate,
    ) -> Result<Option<AcademicFaculty>, StoreError> {
        let mut state = write(&self.state);
        let Some(position) = state.faculties.iter().position(|f| f.id == id) else {
            return Ok(None);
        };

        let mut candidate = state.faculties[position].clone();
        candidate.apply_update(update);
        if state
            .faculties
            .iter()
            .any(|f| f.id != id && f.title == candidate.title)
        {
            return Err(duplicate(
                "Academic faculty",
                "title",
                candidate.title.clone(),
            ));
        }

        state.faculties[position] = candidate.clone();
        Ok(Some(candidate))
    }

    async fn delete(&self, id: Uuid) -> Result<Option<AcademicFaculty>, StoreError> {
        let mut state = write(&self.state);
        let position = state.faculties.iter().position(|f| f.id == id);
        Ok(position.map(|index| state.faculties.remove(index)))
    }
}

#[async_trait]
impl AcademicDepartmentRepository for MemoryStore {
    async fn insert(&self, department: &AcademicDepartment) -> Result<(), StoreError> {
        let mut state = write(&self.state);
        if state.departments.iter().any(|d| d.title == department.title) {
            return Err(duplicate(
                "Academic department",
                "title",
                department.title.clone(),
            ));
        }
        state.departments.push(department.clone());
        Ok(())
    }

    async fn find(
        &self,
        predicate: &Predicate,
        pagination: &Pagination,
    ) -> Result<(Vec<PopulatedDepartment>, u64), StoreError> {
        let state = read(&self.state);
        let (page, total) = run_query(&state.departments, predicate, pagination)?;
        let populated = page
            .into_iter()
            .map(|department| {
                let faculty = state.faculty_by_id(department.academic_faculty);
                PopulatedDepartment::new(department, faculty)
            })
            .collect();
        Ok((populated, total))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<PopulatedDepartment>, StoreError> {
        let state = read(&self.state);
        Ok(state.department_by_id(id).map(|department| {
            let faculty = state.faculty_by_id(department.academic_faculty);
            PopulatedDepartment::new(department, faculty)
        }))
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<AcademicDepartment>, StoreError> {
        let state = read(&self.state);
        Ok(state.departments.iter().find(|d| d.title == title).cloned())
    }

    async fn update(
        &self,
        id: Uuid,
        update: &AcademicDepartmentUpdate,
    ) -> Result<Option<AcademicDepartment>, StoreError> {
        let mut state = write(&self.state);
        let Some(position) = state.departments.iter().position(|d| d.id == id) else {
            return Ok(None);
        };

        let mut candidate = state.departments[position].clone();
        candidate.apply_update(update);
        if state
            .departments
            .iter()
            .any(|d| d.id != id && d.title == candidate.title)
        {
            return Err(duplicate(
                "Academic department",
                "title",
                candidate.title.clone(),
            ));
        }

        state.departments[position] = candidate.clone();
        Ok(Some(candidate))
    }

    async fn delete(&self, id: Uuid) -> Result<Option<AcademicDepartment>, StoreError> {
        let mut state = write(&self.state);
        let position = state.departments.iter().position(|d| d.id == id);
        Ok(position.map(|index| state.departments.remove(index)))
    }
}

#[async_trait]
impl StudentRepository for MemoryStore {
    async fn find(
        &self,
        predicate: &Predicate,
        pagination: &Pagination,
    ) -> Result<(Vec<PopulatedStudent>, u64), StoreError> {
        let state = read(&self.state);
        let (page, total) = run_query(&state.students, predicate, pagination)?;
        let populated = page
            .into_iter()
            .map(|student| state.populate_student(student))
            .collect();
        Ok((populated, total))
    }

    async fn find_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Option<PopulatedStudent>, StoreError> {
        let state = read(&self.state);
        Ok(state
            .students
            .iter()
            .find(|s| s.profile.id == external_id)
            .cloned()
            .map(|student| state.populate_student(student)))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Student>, StoreError> {
        let state = read(&self.state);
        Ok(state
            .students
            .iter()
            .find(|s| s.profile.email == email)
            .cloned())
    }

    async fn find_by_contact_no(&self, contact_no: &str) -> Result<Option<Student>, StoreError> {
        let state = read(&self.state);
        Ok(state
            .students
            .iter()
            .find(|s| s.profile.contact_no == contact_no)
            .cloned())
    }

    async fn update_by_external_id(
        &self,
        external_id: &str,
        update: &StudentUpdate,
    ) -> Result<Option<PopulatedStudent>, StoreError> {
        let mut state = write(&self.state);
        let Some(position) = state
            .students
            .iter()
            .position(|s| s.profile.id == external_id)
        else {
            return Ok(None);
        };

        let mut candidate = state.students[position].clone();
        candidate.apply_update(update);
        if state.students.iter().any(|s| {
            s.profile.id != external_id && s.profile.contact_no == candidate.profile.contact_no
        }) {
            return Err(duplicate(
                "Student",
                "contactNo",
                candidate.profile.contact_no.clone(),
            ));
        }

        state.students[position] = candidate.clone();
        Ok(Some(state.populate_student(candidate)))
    }
}

#[async_trait]
impl FacultyMemberRepository for MemoryStore {
    async fn find(
        &self,
        predicate: &Predicate,
        pagination: &Pagination,
    ) -> Result<(Vec<PopulatedFacultyMember>, u64), StoreError> {
        let state = read(&self.state);
        let (page, total) = run_query(&state.faculty_members, predicate, pagination)?;
        let populated = page
            .into_iter()
            .map(|member| state.populate_faculty_member(member))
            .collect();
        Ok((populated, total))
    }

    async fn find_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Option<PopulatedFacultyMember>, StoreError> {
        let state = read(&self.state);
        Ok(state
            .faculty_members
            .iter()
            .find(|m| m.profile.id == external_id)
            .cloned()
            .map(|member| state.populate_faculty_member(member)))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<FacultyMember>, StoreError> {
        let state = read(&self.state);
        Ok(state
            .faculty_members
            .iter()
            .find(|m| m.profile.email == email)
            .cloned())
    }

    async fn find_by_contact_no(
        &self,
        contact_no: &str,
    ) -> Result<Option<FacultyMember>, StoreError> {
        let state = read(&self.state);
        Ok(state
            .faculty_members
            .iter()
            .find(|m| m.profile.contact_no == contact_no)
            .cloned())
    }

    async fn update_by_external_id(
        &self,
        external_id: &str,
        update: &FacultyMemberUpdate,
    ) -> Result<Option<PopulatedFacultyMember>, StoreError> {
        let mut state = write(&self.state);
        let Some(position) = state
            .faculty_members
            .iter()
            .position(|m| m.profile.id == external_id)
        else {
            return Ok(None);
        };

        let mut candidate = state.faculty_members[position].clone();
        candidate.apply_update(update);
        if state.faculty_members.iter().any(|m| {
            m.profile.id != external_id && m.profile.contact_no == candidate.profile.contact_no
        }) {
            return Err(duplicate(
                "Faculty",
                "contactNo",
                candidate.profile.contact_no.clone(),
            ));
        }

        state.faculty_members[position] = candidate.clone();
        Ok(Some(state.populate_faculty_member(candidate)))
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_last_external_id(&self, role: Role) -> Result<Option<String>, StoreError> {
        let state = read(&self.state);
        Ok(state
            .users
            .iter()
            .filter(|u| u.role == role)
            .max_by_key(|u| u.created_at)
            .map(|u| u.id.clone()))
    }

    async fn find_by_external_id(&self, external_id: &str) -> Result<Option<User>, StoreError> {
        let state = read(&self.state);
        Ok(state.users.iter().find(|u| u.id == external_id).cloned())
    }

    async fn find_with_profile(
        &self,
        external_id: &str,
    ) -> Result<Option<PopulatedUser>, StoreError> {
        let state = read(&self.state);
        let Some(user) = state.users.iter().find(|u| u.id == external_id) else {
            return Ok(None);
        };

        let student = user.student.and_then(|record_id| {
            state
                .students
                .iter()
                .find(|s| s.profile.record_id == record_id)
                .cloned()
                .map(|s| state.populate_student(s))
        });
        let faculty = user.faculty.and_then(|record_id| {
            state
                .faculty_members
                .iter()
                .find(|m| m.profile.record_id == record_id)
                .cloned()
                .map(|m| state.populate_faculty_member(m))
        });

        Ok(Some(PopulatedUser {
            record_id: user.record_id,
            id: user.id.clone(),
            role: user.role,
            student,
            faculty,
            created_at: user.created_at,
        }))
    }
}

/// One open transaction over a [`MemoryStore`].
///
/// Holds the writer gate for its whole lifetime, so transactions are strictly
/// serialised and the snapshot can be swapped in atomically on commit.
struct MemoryTransaction {
    state: Arc<RwLock<Collections>>,
    snapshot: Collections,
    _gate: OwnedMutexGuard<()>,
}

#[async_trait]
impl TransactionalStore for MemoryStore {
    async fn begin(&self) -> Result<Box<dyn StoreTransaction>, StoreError> {
        let gate = Arc::clone(&self.write_gate).lock_owned().await;
        let snapshot = read(&self.state).clone();
        Ok(Box::new(MemoryTransaction {
            state: Arc::clone(&self.state),
            snapshot,
            _gate: gate,
        }))
    }
}

#[async_trait]
impl StoreTransaction for MemoryTransaction {
    async fn insert_student(&mut self, student: &Student) -> Result<u64, StoreError> {
        self.snapshot.ensure_student_unique(student)?;
        self.snapshot.students.push(student.clone());
        Ok(1)
    }

    async fn insert_faculty_member(&mut self, member: &FacultyMember) -> Result<u64, StoreError> {
        self.snapshot.ensure_faculty_member_unique(member)?;
        self.snapshot.faculty_members.push(member.clone());
        Ok(1)
    }

    async fn insert_user(&mut self, user: &User) -> Result<u64, StoreError> {
        if self.snapshot.users.iter().any(|u| u.id == user.id) {
            return Err(duplicate("User", "id", user.id.clone()));
        }
        self.snapshot.users.push(user.clone());
        Ok(1)
    }

    async fn delete_student(&mut self, external_id: &str) -> Result<Option<Student>, StoreError> {
        let position = self
            .snapshot
            .students
            .iter()
            .position(|s| s.profile.id == external_id);
        Ok(position.map(|index| self.snapshot.students.remove(index)))
    }

    async fn delete_faculty_member(
        &mut self,
        external_id: &str,
    ) -> Result<Option<FacultyMember>, StoreError> {
        let position = self
            .snapshot
            .faculty_members
            .iter()
            .position(|m| m.profile.id == external_id);
        Ok(position.map(|index| self.snapshot.faculty_members.remove(index)))
    }

    async fn delete_user(&mut self, external_id: &str) -> Result<u64, StoreError> {
        let before = self.snapshot.users.len();
        self.snapshot.users.retain(|u| u.id != external_id);
        Ok((before - self.snapshot.users.len()) as u64)
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        *write(&self.state) = self.snapshot;
        Ok(())
    }

    async fn abort(self: Box<Self>) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::query::build_predicate;
    use crate::domain::semester::{Month, NewSemester, SemesterCode};
    use chrono::Utc;
    use rstest::rstest;

    fn semester(title: SemesterTitle, year: i32) -> AcademicSemester {
        AcademicSemester::create(NewSemester {
            title,
            year,
            code: title.code(),
            start_month: Month::January,
            end_month: Month::May,
        })
    }

    fn paginate(page: u64, limit: u64, sort_by: &str, sort_order: SortOrder) -> Pagination {
        Pagination {
            page,
            limit,
            skip: (page - 1) * limit,
            sort_by: sort_by.to_owned(),
            sort_order,
        }
    }

    #[actix_rt::test]
    async fn duplicate_semester_slot_is_rejected_by_the_backstop() {
        let store = MemoryStore::new();
        SemesterRepository::insert(&store, &semester(SemesterTitle::Autumn, 2024))
            .await
            .unwrap();
        let err = SemesterRepository::insert(&store, &semester(SemesterTitle::Autumn, 2024))
            .await
            .unwrap_err();
        assert!(err.is_duplicate_of("title and year"));
    }

    #[actix_rt::test]
    async fn listing_filters_sorts_and_slices() {
        let store = MemoryStore::new();
        for year in [2024, 2025, 2026] {
            SemesterRepository::insert(&store, &semester(SemesterTitle::Autumn, year))
                .await
                .unwrap();
        }

        let predicate = build_predicate(None, &["title"], &[]);
        let pagination = paginate(1, 2, "year", SortOrder::Desc);
        let (page, total) = SemesterRepository::find(&store, &predicate, &pagination)
            .await
            .unwrap();

        assert_eq!(total, 3);
        let years: Vec<i32> = page.iter().map(|s| s.year).collect();
        assert_eq!(years, vec![2026, 2025]);
    }

    #[rstest]
    #[case(Some("autumn"), 1)]
    #[case(Some("02"), 1)]
    #[case(Some("nope"), 0)]
    #[case(None, 2)]
    #[actix_rt::test]
    async fn search_terms_match_searchable_projections(
        #[case] term: Option<&str>,
        #[case] expected: u64,
    ) {
        let store = MemoryStore::new();
        SemesterRepository::insert(&store, &semester(SemesterTitle::Autumn, 2024))
            .await
            .unwrap();
        SemesterRepository::insert(&store, &semester(SemesterTitle::Summer, 2025))
            .await
            .unwrap();

        let predicate = build_predicate(term, &["title", "code", "year"], &[]);
        let (_, total) = SemesterRepository::find(&store, &predicate, &Pagination::default())
            .await
            .unwrap();
        assert_eq!(total, expected);
    }

    #[actix_rt::test]
    async fn aborted_transaction_leaves_no_partial_writes() {
        let store = MemoryStore::new();
        let sem = semester(SemesterTitle::Autumn, 2024);
        SemesterRepository::insert(&store, &sem).await.unwrap();

        let student = sample_student(sem.id);
        let mut txn = store.begin().await.unwrap();
        txn.insert_student(&student).await.unwrap();
        txn.abort().await.unwrap();

        let found = StudentRepository::find_by_email(&store, &student.profile.email)
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[actix_rt::test]
    async fn committed_transaction_is_visible_and_populated() {
        let store = MemoryStore::new();
        let sem = semester(SemesterTitle::Autumn, 2024);
        SemesterRepository::insert(&store, &sem).await.unwrap();

        let student = sample_student(sem.id);
        let user = User {
            record_id: Uuid::new_v4(),
            id: student.profile.id.clone(),
            role: Role::Student,
            password_hash: "hash".to_owned(),
            student: Some(student.profile.record_id),
            faculty: None,
            created_at: Utc::now(),
        };

        let mut txn = store.begin().await.unwrap();
        txn.insert_student(&student).await.unwrap();
        txn.insert_user(&user).await.unwrap();
        txn.commit().await.unwrap();

        let populated = UserRepository::find_with_profile(&store, &student.profile.id)
            .await
            .unwrap()
            .unwrap();
        let profile = populated.student.unwrap();
        assert_eq!(profile.profile.id, student.profile.id);
        assert_eq!(
            profile.academic_semester.map(|s| s.id),
            Some(sem.id),
        );
    }

    #[actix_rt::test]
    async fn duplicate_external_id_inside_a_transaction_is_rejected() {
        let store = MemoryStore::new();
        let sem = semester(SemesterTitle::Autumn, 2024);
        SemesterRepository::insert(&store, &sem).await.unwrap();

        let first = sample_student(sem.id);
        let mut txn = store.begin().await.unwrap();
        txn.insert_student(&first).await.unwrap();
        txn.commit().await.unwrap();

        let mut second = sample_student(sem.id);
        second.profile.record_id = Uuid::new_v4();
        second.profile.email = "other@example.com".to_owned();
        second.profile.contact_no = "02222222222".to_owned();

        let mut txn = store.begin().await.unwrap();
        let err = txn.insert_student(&second).await.unwrap_err();
        assert!(err.is_duplicate_of("id"));
    }

    fn sample_student(semester_id: Uuid) -> Student {
        use crate::domain::profile::{Gender, Guardian, LocalGuardian, Name};
        use crate::domain::student::StudentProfile;

        Student {
            profile: StudentProfile {
                record_id: Uuid::new_v4(),
                id: "240100001".to_owned(),
                name: Name {
                    first_name: "Ayesha".to_owned(),
                    middle_name: None,
                    last_name: "Rahman".to_owned(),
                },
                gender: Gender::Female,
                date_of_birth: "2003-01-15".to_owned(),
                email: "ayesha@example.com".to_owned(),
                contact_no: "01111111111".to_owned(),
                emergency_contact_no: "01999999999".to_owned(),
                blood_group: None,
                present_address: "Dhaka".to_owned(),
                permanent_address: "Dhaka".to_owned(),
                guardian: Guardian {
                    father_name: "Karim".to_owned(),
                    father_occupation: "Teacher".to_owned(),
                    father_contact_no: "01711111111".to_owned(),
                    mother_name: "Salma".to_owned(),
                    mother_occupation: "Doctor".to_owned(),
                    mother_contact_no: "01722222222".to_owned(),
                    address: "Dhaka".to_owned(),
                },
                local_guardian: LocalGuardian {
                    name: "Rafiq".to_owned(),
                    occupation: "Engineer".to_owned(),
                    contact_no: "01733333333".to_owned(),
                    address: "Dhaka".to_owned(),
                },
                profile_image: None,
                created_at: Utc::now(),
            },
            academic_semester: semester_id,
            academic_department: Uuid::new_v4(),
            academic_faculty: Uuid::new_v4(),
        }
    }
}
