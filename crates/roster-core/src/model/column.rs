/// A column of the `students` table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StudentColumn {
    Id,
    Name,
    Email,
    Grade,
    Birthday,
    EnrolledDate,
}

impl StudentColumn {
    pub const ALL: [StudentColumn; 6] = [
        StudentColumn::Id,
        StudentColumn::Name,
        StudentColumn::Email,
        StudentColumn::Grade,
        StudentColumn::Birthday,
        StudentColumn::EnrolledDate,
    ];

    /// SQL column name
    pub fn as_sql(&self) -> &'static str {
        match self {
            StudentColumn::Id => "id",
            StudentColumn::Name => "name",
            StudentColumn::Email => "email",
            StudentColumn::Grade => "grade",
            StudentColumn::Birthday => "birthday",
            StudentColumn::EnrolledDate => "enrolled_date",
        }
    }
}

impl std::fmt::Display for StudentColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// Ordering direction for a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}
