diesel::table! {
    users (id) {
        id -> Int4,
        #[max_length = 255]
        username -> Varchar,
        #[max_length = 255]
        password -> Varchar,
        #[max_length = 20]
        role -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    courses (id) {
        id -> Int4,
        #[max_length = 255]
        name -> Varchar,
        #[max_length = 100]
        code -> Varchar,
        lecturer_id -> Nullable<Int4>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    reports (id) {
        id -> Int4,
        #[max_length = 255]
        faculty -> Varchar,
        #[max_length = 255]
        class_name -> Varchar,
        #[max_length = 100]
        week_of_reporting -> Varchar,
        date_of_lecture -> Date,
        #[max_length = 255]
        course_name -> Varchar,
        #[max_length = 100]
        course_code -> Varchar,
        #[max_length = 255]
        lecturer_name -> Varchar,
        actual_present -> Int4,
        total_registered -> Int4,
        #[max_length = 255]
        venue -> Varchar,
        scheduled_time -> Time,
        topic_taught -> Text,
        learning_outcomes -> Text,
        recommendations -> Text,
        prl_feedback -> Nullable<Text>,
        pl_feedback -> Nullable<Text>,
        created_by -> Nullable<Int4>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    ratings (id) {
        id -> Int4,
        report_id -> Int4,
        student_id -> Int4,
        rating -> Int4,
        feedback -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    feedback (id) {
        id -> Int4,
        report_id -> Int4,
        student_id -> Nullable<Int4>,
        #[sql_name = "feedback"]
        feedback_text -> Text,
        #[max_length = 255]
        topic -> Nullable<Varchar>,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(courses -> users (lecturer_id));
diesel::joinable!(reports -> users (created_by));
diesel::joinable!(ratings -> users (student_id));
diesel::joinable!(ratings -> reports (report_id));
diesel::joinable!(feedback -> users (student_id));
diesel::joinable!(feedback -> reports (report_id));

diesel::allow_tables_to_appear_in_same_query!(users, courses, reports, ratings, feedback,);
