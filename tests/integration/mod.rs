mod etf_export;
