pub mod flash_notice;
pub mod items_list;
pub mod review_form;
pub mod reviews_list;
