//! Table definitions
//!
//! Ids are stored as CHAR(36) UUID strings. Usernames are unique per
//! table, so the same username can exist once as a teacher and once as
//! a student.

pub const CREATE_TEACHERS: &str = r#"
    CREATE TABLE IF NOT EXISTS teachers (
        id CHAR(36) NOT NULL PRIMARY KEY,
        username VARCHAR(255) NOT NULL,
        password_hash VARCHAR(255) NOT NULL,
        created_at DATETIME(6) NOT NULL,
        updated_at DATETIME(6) NOT NULL,
        UNIQUE KEY uq_teachers_username (username)
    ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4
"#;

pub const CREATE_STUDENTS: &str = r#"
    CREATE TABLE IF NOT EXISTS students (
        id CHAR(36) NOT NULL PRIMARY KEY,
        username VARCHAR(255) NOT NULL,
        password_hash VARCHAR(255) NOT NULL,
        created_at DATETIME(6) NOT NULL,
        updated_at DATETIME(6) NOT NULL,
        UNIQUE KEY uq_students_username (username)
    ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4
"#;

pub const CREATE_COURSES: &str = r#"
    CREATE TABLE IF NOT EXISTS courses (
        id CHAR(36) NOT NULL PRIMARY KEY,
        title VARCHAR(255) NOT NULL,
        description TEXT NOT NULL,
        price DOUBLE NOT NULL,
        image_link VARCHAR(2048) NULL,
        published BOOLEAN NOT NULL DEFAULT FALSE,
        owner_id CHAR(36) NOT NULL,
        created_at DATETIME(6) NOT NULL,
        updated_at DATETIME(6) NOT NULL,
        KEY idx_courses_owner (owner_id),
        KEY idx_courses_published (published),
        CONSTRAINT fk_courses_owner FOREIGN KEY (owner_id) REFERENCES teachers (id)
    ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4
"#;

pub const CREATE_STUDENT_PURCHASES: &str = r#"
    CREATE TABLE IF NOT EXISTS student_purchases (
        id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
        student_id CHAR(36) NOT NULL,
        course_id CHAR(36) NOT NULL,
        purchased_at DATETIME(6) NOT NULL,
        UNIQUE KEY uq_student_course (student_id, course_id),
        CONSTRAINT fk_purchases_student FOREIGN KEY (student_id) REFERENCES students (id),
        CONSTRAINT fk_purchases_course FOREIGN KEY (course_id) REFERENCES courses (id) ON DELETE CASCADE
    ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4
"#;

/// Statements in dependency order
pub const ALL: [&str; 4] = [
    CREATE_TEACHERS,
    CREATE_STUDENTS,
    CREATE_COURSES,
    CREATE_STUDENT_PURCHASES,
];
