pub mod create_cv;
pub mod fetch_cv_by_id;
pub mod fetch_user_cvs;
pub mod hard_delete_cv;
pub mod patch_cv;
pub mod record_verification;
pub mod update_cv;
