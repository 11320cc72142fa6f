mod rm_file;
