//! Enums mirroring the seeded lookup tables.
//!
//! Each variant's discriminant matches the seed order (1-based) of the
//! corresponding table in `db/migrations`, and its name matches the `name`
//! column. Handlers render names; repositories bind ids.

use serde::Serialize;

use crate::types::LookupId;

macro_rules! define_lookup_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $val:literal => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(i16)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $val ),+
        }

        impl $name {
            /// Every variant in seed order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Return the lookup-table id.
            pub fn id(self) -> LookupId {
                self as LookupId
            }

            /// Return the lookup-table `name` value.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $label ),+
                }
            }

            /// Resolve a lookup-table id, `None` for ids outside the seed data.
            pub fn from_id(id: LookupId) -> Option<Self> {
                match id {
                    $( $val => Some($name::$variant), )+
                    _ => None,
                }
            }

            /// Resolve a lookup-table `name` value.
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $( $label => Some($name::$variant), )+
                    _ => None,
                }
            }
        }

        impl From<$name> for LookupId {
            fn from(value: $name) -> Self {
                value as LookupId
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

define_lookup_enum! {
    /// The four fixed file types a submission may carry.
    FileType {
        Award = 1 => "award",
        AwardFinancial = 2 => "award_financial",
        Appropriations = 3 => "appropriations",
        ProgramActivity = 4 => "program_activity",
    }
}

define_lookup_enum! {
    /// Job lifecycle status.
    JobStatus {
        /// Created; waiting for the client to finish uploading.
        Waiting = 1 => "waiting",
        /// Upload finalized; ready for the validator.
        Ready = 2 => "ready",
        Running = 3 => "running",
        Finished = 4 => "finished",
        Invalid = 5 => "invalid",
        Failed = 6 => "failed",
    }
}

define_lookup_enum! {
    /// Kind of processing a job performs.
    JobType {
        FileUpload = 1 => "file_upload",
        CsvRecordValidation = 2 => "csv_record_validation",
        DbTransfer = 3 => "db_transfer",
        Validation = 4 => "validation",
        ExternalValidation = 5 => "external_validation",
    }
}

define_lookup_enum! {
    /// Header validation outcome stored in `file_status`.
    FileStatusKind {
        Complete = 1 => "complete",
        HeaderError = 2 => "header_error",
        UnknownError = 3 => "unknown_error",
        SingleRowError = 4 => "single_row_error",
        JobError = 5 => "job_error",
    }
}

define_lookup_enum! {
    /// Category of a row-level validation failure stored in `error_data`.
    ErrorType {
        TypeError = 1 => "type_error",
        RequiredError = 2 => "required_error",
        ValueError = 3 => "value_error",
        ReadError = 4 => "read_error",
        WriteError = 5 => "write_error",
        RuleFailed = 6 => "rule_failed",
        LengthError = 7 => "length_error",
    }
}

impl FileStatusKind {
    /// Seeded `description` column.
    pub fn description(self) -> &'static str {
        match self {
            Self::Complete => "File has been processed",
            Self::HeaderError => "The file has errors in the header row",
            Self::UnknownError => "An unknown error has occurred with this file",
            Self::SingleRowError => "Error occurred in job manager, this file has only one row",
            Self::JobError => "File has not yet been processed",
        }
    }
}

impl ErrorType {
    /// Seeded `description` column.
    pub fn description(self) -> &'static str {
        match self {
            Self::TypeError => "The value provided was of the wrong type",
            Self::RequiredError => "A required value was not provided",
            Self::ValueError => "The value provided was invalid",
            Self::ReadError => "Could not parse this record correctly",
            Self::WriteError => "Could not write this record into the staging table",
            Self::RuleFailed => "A rule failed for this value",
            Self::LengthError => "Value was longer than allowed length",
        }
    }
}
